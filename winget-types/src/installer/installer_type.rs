use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Enumeration of installer technologies. Which wire keywords map to which variant depends on the
/// schema version a payload was produced for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InstallerType {
    #[default]
    Unknown,
    Inno,
    Wix,
    Msi,
    Nullsoft,
    Zip,
    Msix,
    Exe,
    Burn,
    #[serde(rename = "msstore")]
    MsStore,
    Portable,
    Font,
}

impl InstallerType {
    #[must_use]
    pub const fn is_archive(self) -> bool {
        matches!(self, Self::Zip)
    }
}
