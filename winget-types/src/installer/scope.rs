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
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scope {
    #[default]
    #[strum(disabled)]
    Unknown,
    User,
    Machine,
}

impl Scope {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}
