use std::{num::ParseIntError, str::FromStr};

use derive_more::Display;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// A `major.minor.patch` schema version as negotiated with a REST source.
///
/// Minor and patch parts may be omitted, in which case they are zero. `"1.10"` is therefore equal
/// to `"1.10.0"`.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[display("{_0}.{_1}.{_2}")]
pub struct ManifestVersion(u16, u16, u16);

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ManifestVersionError {
    #[error("Manifest version must have a major part")]
    NoMajorVersion,
    #[error("Manifest version must have at most {} parts", ManifestVersion::PARTS_COUNT)]
    TooManyParts,
    #[error(transparent)]
    InvalidPart(#[from] ParseIntError),
}

impl ManifestVersion {
    pub const V1_0: Self = Self(1, 0, 0);
    pub const V1_1: Self = Self(1, 1, 0);
    pub const V1_4: Self = Self(1, 4, 0);
    pub const V1_5: Self = Self(1, 5, 0);
    pub const V1_6: Self = Self(1, 6, 0);
    pub const V1_7: Self = Self(1, 7, 0);
    pub const V1_9: Self = Self(1, 9, 0);
    pub const V1_10: Self = Self(1, 10, 0);
    pub const V1_12: Self = Self(1, 12, 0);

    const PARTS_COUNT: usize = 3;
    const SEPARATOR: char = '.';

    pub fn new<S: AsRef<str>>(input: S) -> Result<Self, ManifestVersionError> {
        let input = input.as_ref().trim();
        if input.is_empty() {
            return Err(ManifestVersionError::NoMajorVersion);
        }

        let mut parts = [0; Self::PARTS_COUNT];
        for (index, part) in input.split(Self::SEPARATOR).enumerate() {
            *parts
                .get_mut(index)
                .ok_or(ManifestVersionError::TooManyParts)? = part.trim().parse::<u16>()?;
        }

        let [major, minor, patch] = parts;
        Ok(Self(major, minor, patch))
    }

    #[must_use]
    pub const fn from_parts(major: u16, minor: u16, patch: u16) -> Self {
        Self(major, minor, patch)
    }

    #[must_use]
    pub const fn major(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn minor(self) -> u16 {
        self.1
    }

    #[must_use]
    pub const fn patch(self) -> u16 {
        self.2
    }
}

impl FromStr for ManifestVersion {
    type Err = ManifestVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::shared::{ManifestVersion, ManifestVersionError};

    #[rstest]
    #[case("1", ManifestVersion::from_parts(1, 0, 0))]
    #[case("1.9", ManifestVersion::V1_9)]
    #[case("1.10.0", ManifestVersion::V1_10)]
    #[case(" 1.12 ", ManifestVersion::V1_12)]
    #[case("2.0.1", ManifestVersion::from_parts(2, 0, 1))]
    fn parse_manifest_version(#[case] input: &str, #[case] expected: ManifestVersion) {
        assert_eq!(input.parse::<ManifestVersion>(), Ok(expected));
    }

    #[rstest]
    #[case("", ManifestVersionError::NoMajorVersion)]
    #[case("1.2.3.4", ManifestVersionError::TooManyParts)]
    fn invalid_manifest_version(#[case] input: &str, #[case] expected: ManifestVersionError) {
        assert_eq!(ManifestVersion::new(input), Err(expected));
    }

    #[test]
    fn non_numeric_part() {
        assert!(matches!(
            ManifestVersion::new("1.x"),
            Err(ManifestVersionError::InvalidPart(_))
        ));
    }

    #[test]
    fn minor_ordering_is_numeric() {
        assert!(ManifestVersion::V1_9 < ManifestVersion::V1_10);
        assert_eq!(ManifestVersion::V1_10.to_string(), "1.10.0");
    }
}
