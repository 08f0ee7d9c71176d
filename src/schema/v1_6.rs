use serde_json::Value;
use winget_types::{installer::ManifestInstaller, shared::ManifestVersion};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{ManifestSchema, v1_5::V1_5},
    traits::json::JsonExt,
};

const DOWNLOAD_COMMAND_PROHIBITED: &str = "DownloadCommandProhibited";

pub struct V1_6 {
    base: V1_5,
}

impl V1_6 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_5::new(defaults),
        }
    }
}

impl ManifestSchema for V1_6 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_6
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
            installer.download_command_prohibited =
                node.bool(DOWNLOAD_COMMAND_PROHIBITED).unwrap_or_default();
            installer
        }))
    }
}
