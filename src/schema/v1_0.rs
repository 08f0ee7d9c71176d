use serde_json::Value;
use tracing::warn;
use winget_types::{
    installer::{
        Architecture, Dependency, DependencyList, DependencyType, InstallModes, InstallerSwitchType,
        InstallerSwitches, InstallerType, ManifestInstaller, Platform, Scope, UpgradeBehavior,
    },
    locale::{LocaleField, ManifestLocalization},
    shared::{ManifestVersion, Version},
};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{
        ManifestSchema, PACKAGE_IDENTIFIER, insert_list_field, insert_string_fields,
        match_keyword, return_code, sha_256,
    },
    traits::json::JsonExt,
};

const PACKAGE_LOCALE: &str = "PackageLocale";
const TAGS: &str = "Tags";

const INSTALLER_URL: &str = "InstallerUrl";
const INSTALLER_SHA256: &str = "InstallerSha256";
const SIGNATURE_SHA256: &str = "SignatureSha256";
const ARCHITECTURE: &str = "Architecture";
const INSTALLER_TYPE: &str = "InstallerType";
const INSTALLER_LOCALE: &str = "InstallerLocale";
const PLATFORM: &str = "Platform";
const MINIMUM_OS_VERSION: &str = "MinimumOSVersion";
const SCOPE: &str = "Scope";
const INSTALL_MODES: &str = "InstallModes";
const INSTALLER_SWITCHES: &str = "InstallerSwitches";
const INSTALLER_SUCCESS_CODES: &str = "InstallerSuccessCodes";
const UPGRADE_BEHAVIOR: &str = "UpgradeBehavior";
const COMMANDS: &str = "Commands";
const PROTOCOLS: &str = "Protocols";
const FILE_EXTENSIONS: &str = "FileExtensions";
const PACKAGE_FAMILY_NAME: &str = "PackageFamilyName";
const PRODUCT_CODE: &str = "ProductCode";
const CAPABILITIES: &str = "Capabilities";
const RESTRICTED_CAPABILITIES: &str = "RestrictedCapabilities";

const DEPENDENCIES: &str = "Dependencies";
const WINDOWS_FEATURES: &str = "WindowsFeatures";
const WINDOWS_LIBRARIES: &str = "WindowsLibraries";
const EXTERNAL_DEPENDENCIES: &str = "ExternalDependencies";
const PACKAGE_DEPENDENCIES: &str = "PackageDependencies";
const MINIMUM_VERSION: &str = "MinimumVersion";

const LOCALE_FIELDS: [(&str, fn(String) -> LocaleField); 13] = [
    ("PackageName", LocaleField::PackageName),
    ("Publisher", LocaleField::Publisher),
    ("ShortDescription", LocaleField::ShortDescription),
    ("PublisherUrl", LocaleField::PublisherUrl),
    ("PublisherSupportUrl", LocaleField::PublisherSupportUrl),
    ("PrivacyUrl", LocaleField::PrivacyUrl),
    ("Author", LocaleField::Author),
    ("PackageUrl", LocaleField::PackageUrl),
    ("License", LocaleField::License),
    ("LicenseUrl", LocaleField::LicenseUrl),
    ("Copyright", LocaleField::Copyright),
    ("CopyrightUrl", LocaleField::CopyrightUrl),
    ("Description", LocaleField::Description),
];

const INSTALLER_TYPES: [(&str, InstallerType); 9] = [
    ("inno", InstallerType::Inno),
    ("wix", InstallerType::Wix),
    ("msi", InstallerType::Msi),
    ("nullsoft", InstallerType::Nullsoft),
    ("zip", InstallerType::Zip),
    ("appx", InstallerType::Msix),
    ("msix", InstallerType::Msix),
    ("exe", InstallerType::Exe),
    ("burn", InstallerType::Burn),
];

const UPGRADE_BEHAVIORS: [(&str, UpgradeBehavior); 2] = [
    ("install", UpgradeBehavior::Install),
    ("uninstallPrevious", UpgradeBehavior::UninstallPrevious),
];

const SWITCHES: [(&str, InstallerSwitchType); 7] = [
    ("Silent", InstallerSwitchType::Silent),
    ("SilentWithProgress", InstallerSwitchType::SilentWithProgress),
    ("Interactive", InstallerSwitchType::Interactive),
    ("InstallLocation", InstallerSwitchType::InstallLocation),
    ("Log", InstallerSwitchType::Log),
    ("Upgrade", InstallerSwitchType::Upgrade),
    ("Custom", InstallerSwitchType::Custom),
];

/// The baseline level. Owns the installer defaults shared by every level built on top of it.
pub struct V1_0 {
    defaults: InstallerDefaults,
}

impl V1_0 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self { defaults }
    }
}

impl ManifestSchema for V1_0 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_0
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        None
    }

    fn defaults(&self) -> &InstallerDefaults {
        &self.defaults
    }

    fn installer_type(&self, value: &str) -> InstallerType {
        match_keyword(value, &INSTALLER_TYPES).unwrap_or_default()
    }

    fn upgrade_behavior(&self, value: &str) -> Option<UpgradeBehavior> {
        match_keyword(value, &UPGRADE_BEHAVIORS)
    }

    fn installer_switches(&self, node: &Value) -> InstallerSwitches {
        SWITCHES
            .iter()
            .filter_map(|&(key, switch_type)| {
                node.non_empty_string(key)
                    .map(|value| (switch_type, value.to_owned()))
            })
            .collect()
    }

    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        let Some(url) = node.non_empty_string(INSTALLER_URL) else {
            warn!("Installer has no url");
            return Ok(None);
        };

        let Some(architecture) = node.non_empty_string(ARCHITECTURE) else {
            warn!(url, "Installer has no architecture");
            return Ok(None);
        };

        let Some(installer_type) = node.non_empty_string(INSTALLER_TYPE) else {
            warn!(url, "Installer has no installer type");
            return Ok(None);
        };

        Ok(Some(ManifestInstaller {
            url: url.to_owned(),
            sha_256: sha_256(node, INSTALLER_SHA256)?,
            signature_sha_256: sha_256(node, SIGNATURE_SHA256)?,
            locale: node.non_empty_string(INSTALLER_LOCALE).map(str::to_owned),
            architecture: Architecture::from_wire(architecture),
            r#type: schema.installer_type(installer_type),
            platform: node
                .string_array(PLATFORM)
                .iter()
                .filter_map(|platform| Platform::from_wire(platform))
                .collect(),
            minimum_os_version: node.non_empty_string(MINIMUM_OS_VERSION).map(str::to_owned),
            scope: node
                .non_empty_string(SCOPE)
                .map(Scope::from_wire)
                .unwrap_or_default(),
            install_modes: node
                .string_array(INSTALL_MODES)
                .iter()
                .filter_map(|mode| InstallModes::from_wire(mode))
                .collect(),
            switches: node
                .object(INSTALLER_SWITCHES)
                .map(|switches| schema.installer_switches(switches))
                .unwrap_or_default(),
            success_codes: node
                .array(INSTALLER_SUCCESS_CODES)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_i64)
                .filter_map(return_code)
                .collect(),
            upgrade_behavior: node
                .non_empty_string(UPGRADE_BEHAVIOR)
                .and_then(|behavior| schema.upgrade_behavior(behavior))
                .unwrap_or_default(),
            commands: node.string_array(COMMANDS),
            protocols: node.string_array(PROTOCOLS),
            file_extensions: node.string_array(FILE_EXTENSIONS),
            dependencies: node
                .object(DEPENDENCIES)
                .map(dependencies)
                .unwrap_or_default(),
            package_family_name: node.non_empty_string(PACKAGE_FAMILY_NAME).map(str::to_owned),
            product_code: node.non_empty_string(PRODUCT_CODE).map(str::to_owned),
            capabilities: node.string_array(CAPABILITIES),
            restricted_capabilities: node.string_array(RESTRICTED_CAPABILITIES),
            ..ManifestInstaller::default()
        }))
    }

    fn finalize_installer(&self, installer: &mut ManifestInstaller) {
        self.defaults.apply_switches(installer);
    }

    fn locale(
        &self,
        node: &Value,
        _schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestLocalization>> {
        let Some(package_locale) = node.non_empty_string(PACKAGE_LOCALE) else {
            warn!("Locale has no package locale");
            return Ok(None);
        };

        let mut localization = ManifestLocalization::new(package_locale);
        insert_string_fields(&mut localization, node, &LOCALE_FIELDS);
        insert_list_field(&mut localization, node.string_array(TAGS), LocaleField::Tags);
        Ok(Some(localization))
    }
}

fn dependencies(node: &Value) -> DependencyList {
    let mut list = DependencyList::new();

    for (key, r#type) in [
        (WINDOWS_FEATURES, DependencyType::WindowsFeature),
        (WINDOWS_LIBRARIES, DependencyType::WindowsLibrary),
        (EXTERNAL_DEPENDENCIES, DependencyType::External),
    ] {
        list.extend(
            node.string_array(key)
                .into_iter()
                .map(|id| Dependency::new(r#type, id)),
        );
    }

    for package in node.array(PACKAGE_DEPENDENCIES).unwrap_or_default() {
        let Some(id) = package.non_empty_string(PACKAGE_IDENTIFIER) else {
            warn!("Dropped package dependency with no package identifier");
            continue;
        };

        let dependency = Dependency::new(DependencyType::Package, id);
        list.add(match package.non_empty_string(MINIMUM_VERSION) {
            Some(version) => dependency.with_minimum_version(Version::new(version)),
            None => dependency,
        });
    }

    list
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;
    use serde_json::Value;
    use winget_types::{
        installer::{
            Architecture, DependencyType, InstallModes, InstallerSwitchType, InstallerType,
            Platform, Scope, UpgradeBehavior,
        },
        locale::Localization,
        shared::Version,
    };

    use crate::{
        defaults::InstallerDefaults,
        error::{InvalidData, RestError},
        schema::{ManifestSchema, deserialize, v1_0::V1_0},
    };

    const SHA_256: &str = "ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789";

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_manifest() {
        let response = parse(&format!(
            r#"{{"Data":{{"PackageIdentifier":"Foo.Bar","Versions":[{{"PackageVersion":"1.0","DefaultLocale":{{"PackageLocale":"en-US","PackageName":"Bar","Publisher":"Foo Inc","ShortDescription":"desc"}},"Installers":[{{"InstallerUrl":"https://x/y.exe","InstallerSha256":"{SHA_256}","Architecture":"x64","InstallerType":"exe"}}]}}]}}}}"#
        ));

        let manifests = deserialize(&V1_0::new(InstallerDefaults::default()), &response).unwrap();

        assert_eq!(manifests.len(), 1);
        let manifest = &manifests[0];
        assert_eq!(manifest.id, "Foo.Bar");
        assert_eq!(manifest.version, "1.0");
        assert_eq!(manifest.default_localization.locale, "en-US");
        assert_eq!(manifest.default_localization.package_name(), Some("Bar"));
        assert_eq!(manifest.installers.len(), 1);
        let installer = &manifest.installers[0];
        assert_eq!(installer.architecture, Architecture::X64);
        assert_eq!(installer.r#type, InstallerType::Exe);
        assert_eq!(installer.sha_256.unwrap().to_string(), SHA_256);
    }

    #[test]
    fn installer_fields() {
        let schema = V1_0::new(InstallerDefaults::none());
        let installer = schema
            .installer(
                &parse(indoc! {r#"
                    {
                        "InstallerUrl": "https://example.com/setup.msi",
                        "Architecture": "ARM64",
                        "InstallerType": "Wix",
                        "InstallerLocale": "en-GB",
                        "Platform": ["Windows.Desktop", "Windows.Holographic"],
                        "MinimumOSVersion": "10.0.17763.0",
                        "Scope": "machine",
                        "InstallModes": ["interactive", "silent", "unattended"],
                        "InstallerSwitches": {
                            "Silent": "/q",
                            "Log": "",
                            "Custom": "ALLUSERS=1"
                        },
                        "InstallerSuccessCodes": [3010, "1641", 2147500037],
                        "UpgradeBehavior": "UNINSTALLPREVIOUS",
                        "Commands": ["foo", ""],
                        "Protocols": ["foo"],
                        "FileExtensions": ["bar"],
                        "PackageFamilyName": "Foo.Bar_8wekyb3d8bbwe",
                        "ProductCode": "{00000000-0000-0000-0000-000000000000}",
                        "Capabilities": ["internetClient"],
                        "RestrictedCapabilities": ["runFullTrust"]
                    }
                "#}),
                &schema,
            )
            .unwrap()
            .unwrap();

        assert_eq!(installer.architecture, Architecture::Arm64);
        assert_eq!(installer.r#type, InstallerType::Wix);
        assert_eq!(installer.locale.as_deref(), Some("en-GB"));
        assert_eq!(installer.platform, Platform::WINDOWS_DESKTOP);
        assert_eq!(installer.minimum_os_version.as_deref(), Some("10.0.17763.0"));
        assert_eq!(installer.scope, Scope::Machine);
        assert_eq!(
            installer.install_modes,
            InstallModes::INTERACTIVE | InstallModes::SILENT
        );
        assert_eq!(installer.switches.len(), 2);
        assert_eq!(installer.switches[&InstallerSwitchType::Silent], "/q");
        assert_eq!(installer.success_codes, [3010, -2_147_467_259]);
        assert_eq!(installer.upgrade_behavior, UpgradeBehavior::UninstallPrevious);
        assert_eq!(installer.commands, ["foo"]);
        assert_eq!(
            installer.package_family_name.as_deref(),
            Some("Foo.Bar_8wekyb3d8bbwe")
        );
        assert_eq!(installer.capabilities, ["internetClient"]);
        assert_eq!(installer.restricted_capabilities, ["runFullTrust"]);
        assert!(installer.sha_256.is_none());
    }

    #[rstest]
    #[case("appx", InstallerType::Msix)]
    #[case("MSIX", InstallerType::Msix)]
    #[case("nullsoft", InstallerType::Nullsoft)]
    #[case("msstore", InstallerType::Unknown)]
    #[case("portable", InstallerType::Unknown)]
    #[case("font", InstallerType::Unknown)]
    fn installer_type(#[case] value: &str, #[case] expected: InstallerType) {
        assert_eq!(
            V1_0::new(InstallerDefaults::none()).installer_type(value),
            expected
        );
    }

    #[test]
    fn deny_is_not_an_upgrade_behavior() {
        assert_eq!(
            V1_0::new(InstallerDefaults::none()).upgrade_behavior("deny"),
            None
        );
    }

    #[rstest]
    #[case(r#"{"Architecture": "x64", "InstallerType": "exe"}"#)]
    #[case(r#"{"InstallerUrl": "", "Architecture": "x64", "InstallerType": "exe"}"#)]
    #[case(r#"{"InstallerUrl": "https://x/y.exe", "InstallerType": "exe"}"#)]
    #[case(r#"{"InstallerUrl": "https://x/y.exe", "Architecture": "x64"}"#)]
    #[case("null")]
    fn malformed_installer_is_dropped(#[case] json: &str) {
        let schema = V1_0::new(InstallerDefaults::none());
        assert!(schema.installer(&parse(json), &schema).unwrap().is_none());
    }

    #[test]
    fn invalid_sha_256_is_invalid_data() {
        let schema = V1_0::new(InstallerDefaults::none());
        let node = parse(
            r#"{"InstallerUrl": "https://x/y.exe", "InstallerSha256": "XYZ", "Architecture": "x64", "InstallerType": "exe"}"#,
        );
        assert!(matches!(
            schema.installer(&node, &schema),
            Err(RestError::InvalidData(InvalidData::InvalidSha256(_)))
        ));
    }

    #[test]
    fn dependencies() {
        let schema = V1_0::new(InstallerDefaults::none());
        let installer = schema
            .installer(
                &parse(indoc! {r#"
                    {
                        "InstallerUrl": "https://x/y.exe",
                        "Architecture": "x86",
                        "InstallerType": "exe",
                        "Dependencies": {
                            "WindowsFeatures": ["IIS"],
                            "WindowsLibraries": ["Microsoft.VCLibs"],
                            "ExternalDependencies": ["Java"],
                            "PackageDependencies": [
                                { "PackageIdentifier": "Microsoft.DotNet", "MinimumVersion": "6.0" },
                                { "MinimumVersion": "1.0" },
                                { "PackageIdentifier": "microsoft.dotnet", "MinimumVersion": "8.0" },
                                { "PackageIdentifier": "Foo.Bar" }
                            ]
                        }
                    }
                "#}),
                &schema,
            )
            .unwrap()
            .unwrap();

        let dependencies = &installer.dependencies;
        assert_eq!(dependencies.len(), 5);
        assert_eq!(dependencies.dependencies(DependencyType::WindowsFeature).count(), 1);
        let packages = dependencies
            .dependencies(DependencyType::Package)
            .collect::<Vec<_>>();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].id, "Microsoft.DotNet");
        assert_eq!(packages[0].minimum_version, Some(Version::new("8.0")));
        assert_eq!(packages[1].minimum_version, None);
    }

    #[test]
    fn locale_fields() {
        let schema = V1_0::new(InstallerDefaults::none());
        let localization = schema
            .locale(
                &parse(indoc! {r#"
                    {
                        "PackageLocale": "de-DE",
                        "Publisher": "Foo",
                        "License": "MIT",
                        "Description": "",
                        "Tags": ["cli", "", "tool"],
                        "ReleaseNotes": "Not read before 1.1"
                    }
                "#}),
                &schema,
            )
            .unwrap()
            .unwrap();

        assert_eq!(localization.locale, "de-DE");
        assert_eq!(localization.publisher(), Some("Foo"));
        assert_eq!(localization.license(), Some("MIT"));
        assert!(!localization.contains(Localization::Description));
        assert!(!localization.contains(Localization::PackageName));
        assert!(!localization.contains(Localization::ReleaseNotes));
        assert_eq!(
            localization.tags(),
            Some(["cli".to_owned(), "tool".to_owned()].as_slice())
        );
    }

    #[rstest]
    #[case(r#"{"Publisher": "Foo"}"#)]
    #[case(r#"{"PackageLocale": ""}"#)]
    fn locale_without_package_locale_is_dropped(#[case] json: &str) {
        let schema = V1_0::new(InstallerDefaults::none());
        assert!(schema.locale(&parse(json), &schema).unwrap().is_none());
    }

    #[test]
    fn default_switches_fill_gaps() {
        let schema = V1_0::new(InstallerDefaults::default());
        let mut installer = schema
            .installer(
                &parse(indoc! {r#"
                    {
                        "InstallerUrl": "https://x/y.exe",
                        "Architecture": "x64",
                        "InstallerType": "nullsoft",
                        "InstallerSwitches": { "Silent": "/SILENT" }
                    }
                "#}),
                &schema,
            )
            .unwrap()
            .unwrap();
        schema.finalize_installer(&mut installer);

        assert_eq!(installer.switches[&InstallerSwitchType::Silent], "/SILENT");
        assert_eq!(
            installer.switches[&InstallerSwitchType::SilentWithProgress],
            "/S"
        );
        assert!(installer.expected_return_codes.is_empty());
    }

    #[test]
    fn apps_and_features_entries_are_not_read() {
        let schema = V1_0::new(InstallerDefaults::none());
        let entries = parse(r#"[{"DisplayName": "Foo"}]"#);
        assert!(
            schema
                .apps_and_features_entries(entries.as_array().unwrap(), &schema)
                .is_empty()
        );
        assert!(
            schema
                .installation_metadata(&parse(r#"{"DefaultInstallLocation": "C:\\Foo"}"#), &schema)
                .unwrap()
                .is_none()
        );
    }
}
