mod level;
mod v1_0;
mod v1_1;
mod v1_10;
mod v1_12;
mod v1_4;
mod v1_5;
mod v1_6;
mod v1_7;
mod v1_9;

use serde_json::Value;
use tracing::{debug, error, warn};
use winget_types::{
    Manifest,
    installer::{
        AppsAndFeaturesEntry, ExpectedReturnCodeInfo, InstallationMetadata, InstallerReturnCode,
        InstallerSwitches, InstallerType, ManifestInstaller, ReturnResponse, UpgradeBehavior,
    },
    locale::{LocaleField, Localization, ManifestLocalization},
    shared::{ManifestVersion, Sha256},
};

pub(crate) use crate::schema::v1_1::agreement;
pub use crate::schema::level::SchemaLevel;
use crate::{
    defaults::InstallerDefaults,
    error::{InvalidData, Result},
    traits::json::JsonExt,
};

const DATA: &str = "Data";
const PACKAGE_IDENTIFIER: &str = "PackageIdentifier";
const VERSIONS: &str = "Versions";
const PACKAGE_VERSION: &str = "PackageVersion";
const CHANNEL: &str = "Channel";
const DEFAULT_LOCALE: &str = "DefaultLocale";
const MONIKER: &str = "Moniker";
const INSTALLERS: &str = "Installers";
const LOCALES: &str = "Locales";

const REQUIRED_DEFAULT_LOCALE_FIELDS: [Localization; 3] = [
    Localization::PackageName,
    Localization::Publisher,
    Localization::ShortDescription,
];

static NO_DEFAULTS: InstallerDefaults = InstallerDefaults::none();

/// One schema level of the manifest deserializer chain.
///
/// Each level owns the level before it and is returned by [`ManifestSchema::base`]. A level only
/// overrides what changed at its schema version; every method it leaves alone forwards to its
/// base. Parsing methods take the outermost level as `schema` so that conversions introduced by
/// newer levels apply to fields parsed by older ones.
pub trait ManifestSchema: Send + Sync {
    fn manifest_version(&self) -> ManifestVersion;

    fn base(&self) -> Option<&dyn ManifestSchema>;

    fn defaults(&self) -> &InstallerDefaults {
        self.base().map_or(&NO_DEFAULTS, |base| base.defaults())
    }

    fn installer_type(&self, value: &str) -> InstallerType {
        self.base()
            .map_or_else(InstallerType::default, |base| base.installer_type(value))
    }

    fn upgrade_behavior(&self, value: &str) -> Option<UpgradeBehavior> {
        self.base().and_then(|base| base.upgrade_behavior(value))
    }

    fn return_response(&self, value: &str) -> ReturnResponse {
        self.base()
            .map_or_else(ReturnResponse::default, |base| base.return_response(value))
    }

    fn installer_switches(&self, node: &Value) -> InstallerSwitches {
        self.base()
            .map(|base| base.installer_switches(node))
            .unwrap_or_default()
    }

    fn expected_return_code(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Option<(InstallerReturnCode, ExpectedReturnCodeInfo)> {
        self.base()
            .and_then(|base| base.expected_return_code(node, schema))
    }

    /// Parses one installer. `Ok(None)` means the installer is malformed and should be dropped.
    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        self.base()
            .map_or(Ok(None), |base| base.installer(node, schema))
    }

    /// Applies defaults once an installer has been parsed by every level.
    fn finalize_installer(&self, installer: &mut ManifestInstaller) {
        if let Some(base) = self.base() {
            base.finalize_installer(installer);
        }
    }

    /// Parses one localization. `Ok(None)` means the locale is malformed and should be dropped.
    fn locale(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestLocalization>> {
        self.base()
            .map_or(Ok(None), |base| base.locale(node, schema))
    }

    fn apps_and_features_entries(
        &self,
        entries: &[Value],
        schema: &dyn ManifestSchema,
    ) -> Vec<AppsAndFeaturesEntry> {
        self.base()
            .map(|base| base.apps_and_features_entries(entries, schema))
            .unwrap_or_default()
    }

    fn installation_metadata(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<InstallationMetadata>> {
        self.base()
            .map_or(Ok(None), |base| base.installation_metadata(node, schema))
    }
}

/// Deserializes a full manifest response. An absent `Data` node means no manifest was found.
pub fn deserialize(schema: &dyn ManifestSchema, response: &Value) -> Result<Vec<Manifest>> {
    if response.is_null() {
        return Err(InvalidData::NullResponse.into());
    }

    let Some(data) = response.field(DATA) else {
        debug!("Manifest response has no data");
        return Ok(Vec::new());
    };

    deserialize_data(schema, data).inspect_err(|err| {
        error!(%err, "Failed to deserialize manifest response");
    })
}

/// Deserializes the `Data` node of a manifest response into one manifest per version.
pub fn deserialize_data(schema: &dyn ManifestSchema, data: &Value) -> Result<Vec<Manifest>> {
    if !data.is_object() {
        return Err(InvalidData::DataNotObject.into());
    }

    let package_identifier = data
        .non_empty_string(PACKAGE_IDENTIFIER)
        .ok_or(InvalidData::MissingPackageIdentifier)?;

    let versions = data
        .array(VERSIONS)
        .filter(|versions| !versions.is_empty())
        .ok_or_else(|| InvalidData::MissingVersions {
            package_identifier: package_identifier.to_owned(),
        })?;

    versions
        .iter()
        .map(|version| deserialize_version(schema, package_identifier, version))
        .collect()
}

fn deserialize_version(
    schema: &dyn ManifestSchema,
    package_identifier: &str,
    node: &Value,
) -> Result<Manifest> {
    let package_version = node.non_empty_string(PACKAGE_VERSION).ok_or_else(|| {
        InvalidData::MissingPackageVersion {
            package_identifier: package_identifier.to_owned(),
        }
    })?;

    let missing_default_locale = || InvalidData::MissingDefaultLocale {
        package_identifier: package_identifier.to_owned(),
        package_version: package_version.to_owned(),
    };

    let default_locale = node
        .object(DEFAULT_LOCALE)
        .ok_or_else(missing_default_locale)?;
    let default_localization = schema
        .locale(default_locale, schema)?
        .ok_or_else(missing_default_locale)?;

    if let Some(&field) = REQUIRED_DEFAULT_LOCALE_FIELDS
        .iter()
        .find(|&&field| !default_localization.contains(field))
    {
        return Err(InvalidData::IncompleteDefaultLocale {
            package_identifier: package_identifier.to_owned(),
            package_version: package_version.to_owned(),
            field,
        }
        .into());
    }

    let mut installers = Vec::new();
    for installer in node.array(INSTALLERS).unwrap_or_default() {
        match schema.installer(installer, schema)? {
            Some(mut installer) => {
                schema.finalize_installer(&mut installer);
                installers.push(installer);
            }
            None => warn!(package_identifier, package_version, "Dropped malformed installer"),
        }
    }

    if installers.is_empty() {
        return Err(InvalidData::NoValidInstallers {
            package_identifier: package_identifier.to_owned(),
            package_version: package_version.to_owned(),
        }
        .into());
    }

    let mut localizations = Vec::new();
    for locale in node.array(LOCALES).unwrap_or_default() {
        match schema.locale(locale, schema)? {
            Some(localization) => localizations.push(localization),
            None => warn!(package_identifier, package_version, "Dropped malformed locale"),
        }
    }

    Ok(Manifest {
        id: package_identifier.to_owned(),
        version: package_version.to_owned(),
        channel: node.non_empty_string(CHANNEL).map(str::to_owned),
        moniker: default_locale.non_empty_string(MONIKER).map(str::to_owned),
        default_localization,
        localizations,
        installers,
        manifest_version: schema.manifest_version(),
    })
}

/// Case-insensitively finds `value` among wire keywords.
fn match_keyword<T: Copy>(value: &str, keywords: &[(&str, T)]) -> Option<T> {
    keywords
        .iter()
        .find_map(|&(keyword, item)| value.eq_ignore_ascii_case(keyword).then_some(item))
}

/// Inserts every non-empty string field of `node` into the slot it maps to.
fn insert_string_fields(
    localization: &mut ManifestLocalization,
    node: &Value,
    fields: &[(&str, fn(String) -> LocaleField)],
) {
    for &(key, field) in fields {
        if let Some(value) = node.non_empty_string(key) {
            localization.insert(field(value.to_owned()));
        }
    }
}

/// Inserts `values` into the slot `field` maps to unless there are none.
fn insert_list_field<T>(
    localization: &mut ManifestLocalization,
    values: Vec<T>,
    field: fn(Vec<T>) -> LocaleField,
) {
    if !values.is_empty() {
        localization.insert(field(values));
    }
}

/// Converts a JSON integer into an installer exit code, accepting both signed and unsigned forms
/// of 32-bit HRESULTs.
fn return_code(value: i64) -> Option<InstallerReturnCode> {
    i32::try_from(value)
        .ok()
        .or_else(|| u32::try_from(value).ok().map(|code| code as i32))
}

fn sha_256(node: &Value, key: &str) -> Result<Option<Sha256>> {
    node.non_empty_string(key)
        .map(Sha256::from_hex)
        .transpose()
        .map_err(|err| InvalidData::InvalidSha256(err).into())
}
