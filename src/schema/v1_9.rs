use serde_json::Value;
use winget_types::{installer::ManifestInstaller, shared::ManifestVersion};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{ManifestSchema, v1_7::V1_7},
    traits::json::JsonExt,
};

const ARCHIVE_BINARIES_DEPEND_ON_PATH: &str = "ArchiveBinariesDependOnPath";

pub struct V1_9 {
    base: V1_7,
}

impl V1_9 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_7::new(defaults),
        }
    }
}

impl ManifestSchema for V1_9 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_9
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        Ok(self.base.installer(node, schema)?.map(|mut installer| {
            installer.archive_binaries_depend_on_path = node
                .bool(ARCHIVE_BINARIES_DEPEND_ON_PATH)
                .unwrap_or_default();
            installer
        }))
    }
}
