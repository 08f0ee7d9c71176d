use derive_more::Display;
use serde::Serialize;
use serde_with::skip_serializing_none;
use strum::EnumString;

use crate::shared::Sha256;

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct InstallationMetadata {
    pub default_install_location: Option<String>,
    pub files: Vec<MetadataFile>,
}

impl InstallationMetadata {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_install_location.is_none() && self.files.is_empty()
    }
}

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataFile {
    pub relative_file_path: String,
    pub file_sha_256: Option<Sha256>,
    pub file_type: MetadataFileType,
    pub invocation_parameter: Option<String>,
    pub display_name: Option<String>,
}

#[derive(
    Serialize,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MetadataFileType {
    #[default]
    #[strum(disabled)]
    Unknown,
    Launch,
    Uninstall,
    Other,
}

impl MetadataFileType {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}
