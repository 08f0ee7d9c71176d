use serde_json::Value;
use tracing::warn;
use winget_types::{
    locale::{Icon, IconFileType, IconResolution, IconTheme, LocaleField, ManifestLocalization},
    shared::ManifestVersion,
};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{ManifestSchema, insert_list_field, sha_256, v1_4::V1_4},
    traits::json::JsonExt,
};

const ICONS: &str = "Icons";
const ICON_URL: &str = "IconUrl";
const ICON_FILE_TYPE: &str = "IconFileType";
const ICON_RESOLUTION: &str = "IconResolution";
const ICON_THEME: &str = "IconTheme";
const ICON_SHA256: &str = "IconSha256";

pub struct V1_5 {
    base: V1_4,
}

impl V1_5 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_4::new(defaults),
        }
    }
}

impl ManifestSchema for V1_5 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_5
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    fn locale(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestLocalization>> {
        let Some(mut localization) = self.base.locale(node, schema)? else {
            return Ok(None);
        };

        let mut icons = Vec::new();
        for entry in node.array(ICONS).unwrap_or_default() {
            if let Some(icon) = icon(entry)? {
                icons.push(icon);
            }
        }
        insert_list_field(&mut localization, icons, LocaleField::Icons);

        Ok(Some(localization))
    }
}

/// Parses one icon. Unrecognised enumeration values drop the icon instead of being stored as
/// unknown.
fn icon(node: &Value) -> Result<Option<Icon>> {
    let Some(url) = node.non_empty_string(ICON_URL) else {
        warn!("Icon has no url");
        return Ok(None);
    };

    let Some(file_type) = node
        .non_empty_string(ICON_FILE_TYPE)
        .and_then(|file_type| file_type.parse::<IconFileType>().ok())
    else {
        warn!(url, "Icon has no recognised file type");
        return Ok(None);
    };

    let Ok(resolution) = node
        .non_empty_string(ICON_RESOLUTION)
        .map(str::parse::<IconResolution>)
        .transpose()
    else {
        warn!(url, "Icon has an unrecognised resolution");
        return Ok(None);
    };

    let Ok(theme) = node
        .non_empty_string(ICON_THEME)
        .map(str::parse::<IconTheme>)
        .transpose()
    else {
        warn!(url, "Icon has an unrecognised theme");
        return Ok(None);
    };

    Ok(Some(Icon {
        url: url.to_owned(),
        file_type,
        resolution,
        theme,
        sha_256: sha_256(node, ICON_SHA256)?,
    }))
}
