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
pub enum Architecture {
    #[default]
    #[strum(disabled)]
    Unknown,
    X86,
    X64,
    Arm,
    Arm64,
    Neutral,
}

impl Architecture {
    #[must_use]
    pub const fn is_64_bit(self) -> bool {
        matches!(self, Self::X64 | Self::Arm64)
    }

    /// Converts a wire value, mapping anything unrecognised to [`Architecture::Unknown`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::installer::Architecture;

    #[rstest]
    #[case("x86", Architecture::X86)]
    #[case("X64", Architecture::X64)]
    #[case("arm", Architecture::Arm)]
    #[case("ARM64", Architecture::Arm64)]
    #[case("Neutral", Architecture::Neutral)]
    #[case("unknown", Architecture::Unknown)]
    #[case("amd64", Architecture::Unknown)]
    #[case("", Architecture::Unknown)]
    fn architecture_from_wire(#[case] value: &str, #[case] expected: Architecture) {
        assert_eq!(Architecture::from_wire(value), expected);
    }
}
