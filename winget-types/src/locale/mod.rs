mod agreement;
mod documentation;
mod icon;

use std::collections::BTreeMap;

use serde::Serialize;
use strum::EnumDiscriminants;

pub use crate::locale::{
    agreement::Agreement,
    documentation::Documentation,
    icon::{Icon, IconFileType, IconResolution, IconTheme},
};

/// A single localized attribute together with its value.
///
/// The discriminant of each variant is a [`Localization`] key, so an attribute can only ever be
/// stored with the value type it is defined with.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, EnumDiscriminants)]
#[strum_discriminants(
    name(Localization),
    derive(strum::Display, Hash, Ord, PartialOrd, Serialize)
)]
#[serde(untagged)]
pub enum LocaleField {
    PackageName(String),
    Publisher(String),
    PublisherUrl(String),
    PublisherSupportUrl(String),
    PrivacyUrl(String),
    Author(String),
    PackageUrl(String),
    License(String),
    LicenseUrl(String),
    Copyright(String),
    CopyrightUrl(String),
    ShortDescription(String),
    Description(String),
    Tags(Vec<String>),
    Agreements(Vec<Agreement>),
    ReleaseNotes(String),
    ReleaseNotesUrl(String),
    PurchaseUrl(String),
    InstallationNotes(String),
    Documentations(Vec<Documentation>),
    Icons(Vec<Icon>),
}

/// The localized metadata of a manifest for one locale.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ManifestLocalization {
    #[serde(rename = "PackageLocale")]
    pub locale: String,
    #[serde(flatten)]
    fields: BTreeMap<Localization, LocaleField>,
}

macro_rules! accessors {
    ($($method:ident => $variant:ident: $target:ty),* $(,)?) => {
        $(
            #[must_use]
            pub fn $method(&self) -> Option<&$target> {
                match self.fields.get(&Localization::$variant) {
                    Some(LocaleField::$variant(value)) => Some(&**value),
                    _ => None,
                }
            }
        )*
    };
}

impl ManifestLocalization {
    pub fn new<S: Into<String>>(locale: S) -> Self {
        Self {
            locale: locale.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Stores `field`, replacing any earlier value for the same attribute.
    pub fn insert(&mut self, field: LocaleField) {
        self.fields.insert(Localization::from(&field), field);
    }

    #[must_use]
    pub fn get(&self, key: Localization) -> Option<&LocaleField> {
        self.fields.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: Localization) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleField> {
        self.fields.values()
    }

    accessors! {
        package_name => PackageName: str,
        publisher => Publisher: str,
        publisher_url => PublisherUrl: str,
        publisher_support_url => PublisherSupportUrl: str,
        privacy_url => PrivacyUrl: str,
        author => Author: str,
        package_url => PackageUrl: str,
        license => License: str,
        license_url => LicenseUrl: str,
        copyright => Copyright: str,
        copyright_url => CopyrightUrl: str,
        short_description => ShortDescription: str,
        description => Description: str,
        tags => Tags: [String],
        agreements => Agreements: [Agreement],
        release_notes => ReleaseNotes: str,
        release_notes_url => ReleaseNotesUrl: str,
        purchase_url => PurchaseUrl: str,
        installation_notes => InstallationNotes: str,
        documentations => Documentations: [Documentation],
        icons => Icons: [Icon],
    }
}
