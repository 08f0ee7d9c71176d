use serde_json::Value;
use winget_types::{
    installer::{InstallerSwitchType, InstallerSwitches, ManifestInstaller, RepairBehavior},
    shared::ManifestVersion,
};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{ManifestSchema, v1_6::V1_6},
    traits::json::JsonExt,
};

const REPAIR: &str = "Repair";
const REPAIR_BEHAVIOR: &str = "RepairBehavior";

pub struct V1_7 {
    base: V1_6,
}

impl V1_7 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_6::new(defaults),
        }
    }
}

impl ManifestSchema for V1_7 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_7
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    fn installer_switches(&self, node: &Value) -> InstallerSwitches {
        let mut switches = self.base.installer_switches(node);
        if let Some(repair) = node.non_empty_string(REPAIR) {
            switches.insert(InstallerSwitchType::Repair, repair.to_owned());
        }
        switches
    }

    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        Ok(self.base.installer(node, schema)?.map(|mut installer| {
            installer.repair_behavior = node
                .non_empty_string(REPAIR_BEHAVIOR)
                .map(RepairBehavior::from_wire)
                .filter(|&behavior| behavior != RepairBehavior::Unknown);
            installer
        }))
    }
}

#[cfg(test)]
mod tests {
    use indoc::formatdoc;
    use rstest::rstest;
    use serde_json::Value;
    use winget_types::installer::{InstallerSwitchType, RepairBehavior};

    use crate::{
        defaults::InstallerDefaults,
        schema::{ManifestSchema, v1_6::V1_6, v1_7::V1_7},
    };

    fn installer_node(repair_behavior: &str) -> Value {
        serde_json::from_str(&formatdoc! {r#"
                {{
                    "InstallerUrl": "https://x/y.exe",
                    "Architecture": "x64",
                    "InstallerType": "exe",
                    "RepairBehavior": "{repair_behavior}",
                    "InstallerSwitches": {{ "Silent": "/s", "Repair": "/repair" }}
                }}
            "#})
        .unwrap()
    }

    #[rstest]
    #[case("modify", Some(RepairBehavior::Modify))]
    #[case("Uninstaller", Some(RepairBehavior::Uninstaller))]
    #[case("installer", Some(RepairBehavior::Installer))]
    #[case("reinstall", None)]
    fn repair_behavior(#[case] value: &str, #[case] expected: Option<RepairBehavior>) {
        let schema = V1_7::new(InstallerDefaults::none());
        let installer = schema
            .installer(&installer_node(value), &schema)
            .unwrap()
            .unwrap();
        assert_eq!(installer.repair_behavior, expected);
        assert_eq!(installer.switches[&InstallerSwitchType::Repair], "/repair");
        assert_eq!(installer.switches[&InstallerSwitchType::Silent], "/s");
    }

    #[test]
    fn repair_is_not_read_before_1_7() {
        let schema = V1_6::new(InstallerDefaults::none());
        let installer = schema
            .installer(&installer_node("modify"), &schema)
            .unwrap()
            .unwrap();
        assert!(installer.repair_behavior.is_none());
        assert!(!installer.switches.contains_key(&InstallerSwitchType::Repair));
    }
}
