use derive_more::Display;
use serde::Serialize;
use strum::EnumString;

#[derive(
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
    Serialize,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RepairBehavior {
    #[default]
    #[strum(disabled)]
    Unknown,
    Modify,
    Uninstaller,
    Installer,
}

impl RepairBehavior {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}
