use std::fmt::{Display, Formatter};

use strum::VariantArray;
use winget_types::shared::ManifestVersion;

use crate::{
    defaults::InstallerDefaults,
    error::{RestError, Result},
    schema::{
        ManifestSchema, v1_0::V1_0, v1_1::V1_1, v1_4::V1_4, v1_5::V1_5, v1_6::V1_6, v1_7::V1_7,
        v1_9::V1_9, v1_10::V1_10, v1_12::V1_12,
    },
};

/// The schema versions that introduced new manifest fields, in ascending order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, VariantArray)]
pub enum SchemaLevel {
    V1_0,
    V1_1,
    V1_4,
    V1_5,
    V1_6,
    V1_7,
    V1_9,
    V1_10,
    V1_12,
}

impl SchemaLevel {
    #[must_use]
    pub const fn version(self) -> ManifestVersion {
        match self {
            Self::V1_0 => ManifestVersion::V1_0,
            Self::V1_1 => ManifestVersion::V1_1,
            Self::V1_4 => ManifestVersion::V1_4,
            Self::V1_5 => ManifestVersion::V1_5,
            Self::V1_6 => ManifestVersion::V1_6,
            Self::V1_7 => ManifestVersion::V1_7,
            Self::V1_9 => ManifestVersion::V1_9,
            Self::V1_10 => ManifestVersion::V1_10,
            Self::V1_12 => ManifestVersion::V1_12,
        }
    }

    /// The highest level whose version is less than or equal to `version`.
    ///
    /// Only major version 1 is supported.
    pub fn for_version(version: ManifestVersion) -> Result<Self> {
        if version.major() != 1 {
            return Err(RestError::UnsupportedVersion(version));
        }

        Ok(Self::VARIANTS
            .iter()
            .rev()
            .copied()
            .find(|level| level.version() <= version)
            .unwrap_or(Self::V1_0))
    }

    /// Builds the deserializer chain for this level.
    #[must_use]
    pub fn build(self, defaults: InstallerDefaults) -> Box<dyn ManifestSchema> {
        match self {
            Self::V1_0 => Box::new(V1_0::new(defaults)),
            Self::V1_1 => Box::new(V1_1::new(defaults)),
            Self::V1_4 => Box::new(V1_4::new(defaults)),
            Self::V1_5 => Box::new(V1_5::new(defaults)),
            Self::V1_6 => Box::new(V1_6::new(defaults)),
            Self::V1_7 => Box::new(V1_7::new(defaults)),
            Self::V1_9 => Box::new(V1_9::new(defaults)),
            Self::V1_10 => Box::new(V1_10::new(defaults)),
            Self::V1_12 => Box::new(V1_12::new(defaults)),
        }
    }
}

impl Display for SchemaLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.version().fmt(f)
    }
}
