use winget_types::{installer::InstallerType, shared::ManifestVersion};

use crate::{
    defaults::InstallerDefaults,
    schema::{ManifestSchema, v1_10::V1_10},
};

const FONT: &str = "font";

pub struct V1_12 {
    base: V1_10,
}

impl V1_12 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_10::new(defaults),
        }
    }
}

impl ManifestSchema for V1_12 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_12
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    fn installer_type(&self, value: &str) -> InstallerType {
        if value.eq_ignore_ascii_case(FONT) {
            InstallerType::Font
        } else {
            self.base.installer_type(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;
    use winget_types::installer::InstallerType;

    use crate::{
        defaults::InstallerDefaults,
        schema::{ManifestSchema, v1_12::V1_12},
    };

    #[rstest]
    #[case("font", InstallerType::Font)]
    #[case("FONT", InstallerType::Font)]
    #[case("portable", InstallerType::Portable)]
    #[case("msstore", InstallerType::MsStore)]
    #[case("appx", InstallerType::Msix)]
    #[case("typeface", InstallerType::Unknown)]
    fn installer_type(#[case] value: &str, #[case] expected: InstallerType) {
        assert_eq!(V1_12::new(InstallerDefaults::none()).installer_type(value), expected);
    }

    #[test]
    fn nested_font_installer() {
        let node = serde_json::from_str::<Value>(
            r#"{"InstallerUrl": "https://x/y.zip", "Architecture": "neutral", "InstallerType": "zip", "NestedInstallerType": "font"}"#,
        )
        .unwrap();
        let schema = V1_12::new(InstallerDefaults::none());
        let installer = schema.installer(&node, &schema).unwrap().unwrap();
        assert_eq!(installer.nested_installer_type, Some(InstallerType::Font));
    }
}
