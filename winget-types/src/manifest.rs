use std::collections::BTreeSet;

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    installer::ManifestInstaller, locale::ManifestLocalization, shared::ManifestVersion,
};

/// The full description of one version of a package.
#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Manifest {
    #[serde(rename = "PackageIdentifier")]
    pub id: String,
    #[serde(rename = "PackageVersion")]
    pub version: String,
    pub channel: Option<String>,
    pub moniker: Option<String>,
    #[serde(rename = "DefaultLocale")]
    pub default_localization: ManifestLocalization,
    #[serde(rename = "Locales")]
    pub localizations: Vec<ManifestLocalization>,
    pub installers: Vec<ManifestInstaller>,
    pub manifest_version: ManifestVersion,
}

impl Manifest {
    /// The localization for `locale`, falling back to the default localization.
    #[must_use]
    pub fn localization(&self, locale: &str) -> &ManifestLocalization {
        self.localizations
            .iter()
            .find(|localization| localization.locale.eq_ignore_ascii_case(locale))
            .unwrap_or(&self.default_localization)
    }

    #[must_use]
    pub fn package_family_names(&self) -> BTreeSet<&str> {
        self.installers
            .iter()
            .filter_map(|installer| installer.package_family_name.as_deref())
            .collect()
    }

    #[must_use]
    pub fn product_codes(&self) -> BTreeSet<&str> {
        self.installers
            .iter()
            .flat_map(|installer| {
                installer.product_code.as_deref().into_iter().chain(
                    installer
                        .apps_and_features_entries
                        .iter()
                        .filter_map(|entry| entry.product_code.as_deref()),
                )
            })
            .collect()
    }

    #[must_use]
    pub fn upgrade_codes(&self) -> BTreeSet<&str> {
        self.installers
            .iter()
            .flat_map(|installer| &installer.apps_and_features_entries)
            .filter_map(|entry| entry.upgrade_code.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Manifest,
        installer::{AppsAndFeaturesEntry, ManifestInstaller},
        locale::ManifestLocalization,
        shared::ManifestVersion,
    };

    fn manifest() -> Manifest {
        Manifest {
            id: "Foo.Bar".to_owned(),
            version: "1.0".to_owned(),
            channel: None,
            moniker: None,
            default_localization: ManifestLocalization::new("en-US"),
            localizations: vec![ManifestLocalization::new("fr-FR")],
            installers: vec![
                ManifestInstaller {
                    product_code: Some("{A}".to_owned()),
                    package_family_name: Some("Foo.Bar_8wekyb3d8bbwe".to_owned()),
                    apps_and_features_entries: vec![AppsAndFeaturesEntry {
                        product_code: Some("{B}".to_owned()),
                        upgrade_code: Some("{C}".to_owned()),
                        ..AppsAndFeaturesEntry::default()
                    }],
                    ..ManifestInstaller::default()
                },
                ManifestInstaller {
                    product_code: Some("{A}".to_owned()),
                    ..ManifestInstaller::default()
                },
            ],
            manifest_version: ManifestVersion::V1_1,
        }
    }

    #[test]
    fn collects_codes() {
        let manifest = manifest();
        assert_eq!(
            manifest.product_codes().into_iter().collect::<Vec<_>>(),
            ["{A}", "{B}"]
        );
        assert_eq!(
            manifest.upgrade_codes().into_iter().collect::<Vec<_>>(),
            ["{C}"]
        );
        assert_eq!(manifest.package_family_names().len(), 1);
    }

    #[test]
    fn localization_falls_back_to_default() {
        let manifest = manifest();
        assert_eq!(manifest.localization("FR-fr").locale, "fr-FR");
        assert_eq!(manifest.localization("de-DE").locale, "en-US");
    }
}
