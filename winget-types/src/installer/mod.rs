mod apps_and_features_entry;
mod architecture;
mod dependencies;
mod elevation_requirement;
mod expected_return_codes;
mod install_modes;
mod installation_metadata;
mod installer_type;
mod markets;
mod nested_installer_file;
mod platform;
mod repair_behavior;
mod return_response;
mod scope;
mod switches;
mod unsupported_arguments;
mod upgrade_behavior;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use serde_with::skip_serializing_none;

pub use crate::installer::{
    apps_and_features_entry::AppsAndFeaturesEntry,
    architecture::Architecture,
    dependencies::{Dependency, DependencyList, DependencyType},
    elevation_requirement::ElevationRequirement,
    expected_return_codes::{ExpectedReturnCodeInfo, ExpectedReturnCodes, InstallerReturnCode},
    install_modes::InstallModes,
    installation_metadata::{InstallationMetadata, MetadataFile, MetadataFileType},
    installer_type::InstallerType,
    markets::Markets,
    nested_installer_file::NestedInstallerFile,
    platform::Platform,
    repair_behavior::RepairBehavior,
    return_response::ReturnResponse,
    scope::Scope,
    switches::{InstallerSwitchType, InstallerSwitches},
    unsupported_arguments::UnsupportedArguments,
    upgrade_behavior::UpgradeBehavior,
};
use crate::shared::{AuthenticationInfo, Sha256};

/// One installable artifact within a manifest.
///
/// Optional collections are empty rather than absent when the payload did not declare them.
#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestInstaller {
    #[serde(rename = "InstallerUrl")]
    pub url: String,
    #[serde(rename = "InstallerSha256")]
    pub sha_256: Option<Sha256>,
    pub signature_sha_256: Option<Sha256>,
    #[serde(rename = "InstallerLocale")]
    pub locale: Option<String>,
    pub architecture: Architecture,
    #[serde(rename = "InstallerType")]
    pub r#type: InstallerType,
    pub nested_installer_type: Option<InstallerType>,
    pub nested_installer_files: Vec<NestedInstallerFile>,
    pub platform: Platform,
    #[serde(rename = "MinimumOSVersion")]
    pub minimum_os_version: Option<String>,
    pub scope: Scope,
    pub install_modes: InstallModes,
    #[serde(rename = "InstallerSwitches")]
    pub switches: InstallerSwitches,
    #[serde(rename = "InstallerSuccessCodes")]
    pub success_codes: Vec<InstallerReturnCode>,
    pub expected_return_codes: ExpectedReturnCodes,
    pub upgrade_behavior: UpgradeBehavior,
    pub commands: Vec<String>,
    pub protocols: Vec<String>,
    pub file_extensions: Vec<String>,
    pub dependencies: DependencyList,
    pub package_family_name: Option<String>,
    pub product_code: Option<String>,
    pub capabilities: Vec<String>,
    pub restricted_capabilities: Vec<String>,
    #[serde(rename = "MSStoreProductIdentifier")]
    pub product_id: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "InstallerAbortsTerminal")]
    pub aborts_terminal: bool,
    pub install_location_required: bool,
    pub require_explicit_upgrade: bool,
    pub display_install_warnings: bool,
    pub elevation_requirement: Option<ElevationRequirement>,
    #[serde(rename = "UnsupportedOSArchitectures")]
    pub unsupported_os_architectures: BTreeSet<Architecture>,
    pub unsupported_arguments: UnsupportedArguments,
    pub apps_and_features_entries: Vec<AppsAndFeaturesEntry>,
    pub markets: Markets,
    pub installation_metadata: Option<InstallationMetadata>,
    pub download_command_prohibited: bool,
    pub repair_behavior: Option<RepairBehavior>,
    pub archive_binaries_depend_on_path: bool,
    #[serde(rename = "Authentication")]
    pub authentication: AuthenticationInfo,
}

impl ManifestInstaller {
    /// The installer type that determines default switches and return codes. For archives this
    /// is the type of the installer nested inside.
    #[must_use]
    pub fn effective_type(&self) -> InstallerType {
        if self.r#type.is_archive() {
            self.nested_installer_type.unwrap_or(self.r#type)
        } else {
            self.r#type
        }
    }

    /// Whether `code` is already accounted for by the success codes or expected return codes.
    #[must_use]
    pub fn declares_return_code(&self, code: InstallerReturnCode) -> bool {
        self.success_codes.contains(&code) || self.expected_return_codes.contains_key(&code)
    }
}
