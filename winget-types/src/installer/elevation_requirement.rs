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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ElevationRequirement {
    #[default]
    #[strum(disabled)]
    Unknown,
    ElevationRequired,
    ElevationProhibited,
    ElevatesSelf,
}

impl ElevationRequirement {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}
