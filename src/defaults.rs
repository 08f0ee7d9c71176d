use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use winget_types::installer::{
    ExpectedReturnCodeInfo, InstallerReturnCode, InstallerSwitchType, InstallerSwitches,
    InstallerType, ManifestInstaller, ReturnResponse,
};

const MSI_SILENT: &str = "/quiet /norestart";
const MSI_SILENT_WITH_PROGRESS: &str = "/passive /norestart";
const MSI_LOG: &str = r#"/log "<LOGPATH>""#;
const MSI_INSTALL_LOCATION: &str = r#"TARGETDIR="<INSTALLPATH>""#;

const NULLSOFT_SILENT: &str = "/S";
const NULLSOFT_INSTALL_LOCATION: &str = "/D=<INSTALLPATH>";

const INNO_SILENT: &str = "/SP- /VERYSILENT /SUPPRESSMSGBOXES /NORESTART";
const INNO_SILENT_WITH_PROGRESS: &str = "/SP- /SILENT /SUPPRESSMSGBOXES /NORESTART";
const INNO_LOG: &str = r#"/LOG="<LOGPATH>""#;
const INNO_INSTALL_LOCATION: &str = r#"/DIR="<INSTALLPATH>""#;

const MSI_RETURN_CODES: [(InstallerReturnCode, ReturnResponse); 19] = [
    (1618, ReturnResponse::InstallInProgress),
    (112, ReturnResponse::DiskFull),
    (1601, ReturnResponse::ContactSupport),
    (3010, ReturnResponse::RebootRequiredToFinish),
    (1641, ReturnResponse::RebootInitiated),
    (1602, ReturnResponse::CancelledByUser),
    (1638, ReturnResponse::AlreadyInstalled),
    (1623, ReturnResponse::SystemNotSupported),
    (1633, ReturnResponse::SystemNotSupported),
    (1654, ReturnResponse::SystemNotSupported),
    (1625, ReturnResponse::BlockedByPolicy),
    (1640, ReturnResponse::BlockedByPolicy),
    (1643, ReturnResponse::BlockedByPolicy),
    (1644, ReturnResponse::BlockedByPolicy),
    (1649, ReturnResponse::BlockedByPolicy),
    (87, ReturnResponse::InvalidParameter),
    (1628, ReturnResponse::InvalidParameter),
    (1639, ReturnResponse::InvalidParameter),
    (1650, ReturnResponse::InvalidParameter),
];

const INNO_RETURN_CODES: [(InstallerReturnCode, ReturnResponse); 3] = [
    (2, ReturnResponse::CancelledByUser),
    (5, ReturnResponse::CancelledByUser),
    (8, ReturnResponse::RebootRequiredForInstall),
];

const MSIX_RETURN_CODES: [(InstallerReturnCode, ReturnResponse); 14] = [
    (0x8007_3CFD_u32 as i32, ReturnResponse::MissingDependency),
    (0x8007_3CF3_u32 as i32, ReturnResponse::MissingDependency),
    (0x8007_3D12_u32 as i32, ReturnResponse::MissingDependency),
    (0x8007_3CF4_u32 as i32, ReturnResponse::DiskFull),
    (0x8007_3CF8_u32 as i32, ReturnResponse::CancelledByUser),
    (0x8007_3CFB_u32 as i32, ReturnResponse::AlreadyInstalled),
    (0x8007_3D06_u32 as i32, ReturnResponse::Downgrade),
    (0x8007_3D01_u32 as i32, ReturnResponse::BlockedByPolicy),
    (0x8007_3CFF_u32 as i32, ReturnResponse::BlockedByPolicy),
    (0x8007_3D02_u32 as i32, ReturnResponse::PackageInUse),
    (0x8007_3D10_u32 as i32, ReturnResponse::SystemNotSupported),
    (0x8007_3D13_u32 as i32, ReturnResponse::SystemNotSupported),
    (0x8007_3D1D_u32 as i32, ReturnResponse::SystemNotSupported),
    (0x8007_3D2A_u32 as i32, ReturnResponse::SystemNotSupported),
];

/// Default installer switches and return codes per installer type.
///
/// Values from a payload always win over these; defaults only fill the gaps.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallerDefaults {
    #[serde(default)]
    pub switches: BTreeMap<InstallerType, InstallerSwitches>,
    #[serde(default)]
    pub return_codes: BTreeMap<InstallerType, BTreeMap<InstallerReturnCode, ReturnResponse>>,
}

impl InstallerDefaults {
    /// An empty table that leaves installers exactly as declared.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            switches: BTreeMap::new(),
            return_codes: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Fills switch slots the installer left unset with the defaults for its effective type.
    pub fn apply_switches(&self, installer: &mut ManifestInstaller) {
        if let Some(defaults) = self.switches.get(&installer.effective_type()) {
            for (switch_type, value) in defaults {
                installer
                    .switches
                    .entry(*switch_type)
                    .or_insert_with(|| value.clone());
            }
        }
    }

    /// Adds the default return codes for the installer's own type that are not already declared
    /// as expected return codes or success codes. A nested installer type does not select codes.
    pub fn apply_return_codes(&self, installer: &mut ManifestInstaller) {
        let Some(defaults) = self.return_codes.get(&installer.r#type) else {
            return;
        };

        for (&code, &response) in defaults {
            if response != ReturnResponse::Unknown && !installer.declares_return_code(code) {
                installer
                    .expected_return_codes
                    .insert(code, ExpectedReturnCodeInfo::new(response));
            }
        }
    }
}

impl Default for InstallerDefaults {
    fn default() -> Self {
        fn switches(entries: &[(InstallerSwitchType, &str)]) -> InstallerSwitches {
            entries
                .iter()
                .map(|&(switch_type, value)| (switch_type, value.to_owned()))
                .collect()
        }

        let msi_switches = switches(&[
            (InstallerSwitchType::Silent, MSI_SILENT),
            (InstallerSwitchType::SilentWithProgress, MSI_SILENT_WITH_PROGRESS),
            (InstallerSwitchType::Log, MSI_LOG),
            (InstallerSwitchType::InstallLocation, MSI_INSTALL_LOCATION),
        ]);
        let nullsoft_switches = switches(&[
            (InstallerSwitchType::Silent, NULLSOFT_SILENT),
            (InstallerSwitchType::SilentWithProgress, NULLSOFT_SILENT),
            (InstallerSwitchType::InstallLocation, NULLSOFT_INSTALL_LOCATION),
        ]);
        let inno_switches = switches(&[
            (InstallerSwitchType::Silent, INNO_SILENT),
            (InstallerSwitchType::SilentWithProgress, INNO_SILENT_WITH_PROGRESS),
            (InstallerSwitchType::Log, INNO_LOG),
            (InstallerSwitchType::InstallLocation, INNO_INSTALL_LOCATION),
        ]);

        let msi_return_codes = BTreeMap::from(MSI_RETURN_CODES);

        Self {
            switches: BTreeMap::from([
                (InstallerType::Msi, msi_switches.clone()),
                (InstallerType::Wix, msi_switches.clone()),
                (InstallerType::Burn, msi_switches),
                (InstallerType::Nullsoft, nullsoft_switches),
                (InstallerType::Inno, inno_switches),
            ]),
            return_codes: BTreeMap::from([
                (InstallerType::Msi, msi_return_codes.clone()),
                (InstallerType::Wix, msi_return_codes.clone()),
                (InstallerType::Burn, msi_return_codes),
                (InstallerType::Inno, BTreeMap::from(INNO_RETURN_CODES)),
                (InstallerType::Msix, BTreeMap::from(MSIX_RETURN_CODES)),
            ]),
        }
    }
}
