use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;
use tracing::{debug, error};
use winget_types::shared::ManifestVersion;

use crate::{
    error::{InvalidData, Result},
    schema::SchemaLevel,
    traits::json::JsonExt,
};

const DATA: &str = "Data";
const CONTINUATION_TOKEN: &str = "ContinuationToken";
const PACKAGE_IDENTIFIER: &str = "PackageIdentifier";
const PACKAGE_NAME: &str = "PackageName";
const PUBLISHER: &str = "Publisher";
const VERSIONS: &str = "Versions";
const PACKAGE_VERSION: &str = "PackageVersion";
const CHANNEL: &str = "Channel";
const PACKAGE_FAMILY_NAMES: &str = "PackageFamilyNames";
const PRODUCT_CODES: &str = "ProductCodes";
const UPGRADE_CODES: &str = "UpgradeCodes";
const APPS_AND_FEATURES_ENTRY_VERSIONS: &str = "AppsAndFeaturesEntryVersions";

#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResult {
    #[serde(rename = "Data")]
    pub matches: Vec<PackageMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PackageMatch {
    pub package_identifier: String,
    pub package_name: String,
    pub publisher: String,
    pub versions: Vec<VersionInfo>,
}

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct VersionInfo {
    pub package_version: String,
    pub channel: Option<String>,
    pub package_family_names: Vec<String>,
    pub product_codes: Vec<String>,
    pub upgrade_codes: Vec<String>,
    pub apps_and_features_entry_versions: Vec<String>,
}

/// Deserializes a search response produced for schema `version`.
///
/// Unlike manifests, one incomplete match invalidates the whole result.
pub fn deserialize(version: ManifestVersion, response: &Value) -> Result<SearchResult> {
    let level = SchemaLevel::for_version(version)?;

    let continuation_token = response
        .non_empty_string(CONTINUATION_TOKEN)
        .map(str::to_owned);

    let Some(data) = response.field(DATA) else {
        debug!("Search response has no data");
        return Ok(SearchResult {
            matches: Vec::new(),
            continuation_token,
        });
    };

    let Some(data) = data.as_array() else {
        error!("Search response data is not an array");
        return Err(InvalidData::DataNotArray.into());
    };

    let matches = data
        .iter()
        .map(|node| package_match(level, node))
        .collect::<Result<Vec<_>>>()
        .inspect_err(|err| error!(%err, "Failed to deserialize search response"))?;

    Ok(SearchResult {
        matches,
        continuation_token,
    })
}

fn package_match(level: SchemaLevel, node: &Value) -> Result<PackageMatch> {
    let required = |key: &'static str| {
        node.non_empty_string(key)
            .map(str::to_owned)
            .ok_or(InvalidData::IncompleteSearchMatch(key))
    };

    let package_identifier = required(PACKAGE_IDENTIFIER)?;
    let package_name = required(PACKAGE_NAME)?;
    let publisher = required(PUBLISHER)?;

    let versions = node
        .array(VERSIONS)
        .filter(|versions| !versions.is_empty())
        .ok_or(InvalidData::IncompleteSearchMatch(VERSIONS))?
        .iter()
        .map(|version| version_info(level, &package_identifier, version))
        .collect::<Result<Vec<_>>>()?;

    Ok(PackageMatch {
        package_identifier,
        package_name,
        publisher,
        versions,
    })
}

fn version_info(
    level: SchemaLevel,
    package_identifier: &str,
    node: &Value,
) -> Result<VersionInfo> {
    let package_version = node.non_empty_string(PACKAGE_VERSION).ok_or_else(|| {
        InvalidData::MissingSearchVersion {
            package_identifier: package_identifier.to_owned(),
        }
    })?;

    let unique = |key: &str| -> Vec<String> {
        node.string_array(key).into_iter().unique().collect()
    };

    let mut version_info = VersionInfo {
        package_version: package_version.to_owned(),
        channel: node.non_empty_string(CHANNEL).map(str::to_owned),
        package_family_names: unique(PACKAGE_FAMILY_NAMES),
        product_codes: unique(PRODUCT_CODES),
        ..VersionInfo::default()
    };

    if level >= SchemaLevel::V1_4 {
        version_info.upgrade_codes = unique(UPGRADE_CODES);
        version_info.apps_and_features_entry_versions = unique(APPS_AND_FEATURES_ENTRY_VERSIONS);
    }

    Ok(version_info)
}
