use std::fmt::{Debug, Formatter};

use serde_json::Value;
use winget_types::{
    Manifest,
    installer::{AppsAndFeaturesEntry, InstallationMetadata},
    locale::ManifestLocalization,
    shared::ManifestVersion,
};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{self, ManifestSchema, SchemaLevel},
};

/// Parses REST manifest payloads with the deserializer chain for one schema version.
pub struct ManifestJsonParser {
    schema: Box<dyn ManifestSchema>,
}

impl ManifestJsonParser {
    /// Builds a parser for `version` with the built-in installer defaults.
    pub fn new(version: ManifestVersion) -> Result<Self> {
        Self::with_defaults(version, InstallerDefaults::default())
    }

    pub fn with_defaults(version: ManifestVersion, defaults: InstallerDefaults) -> Result<Self> {
        Ok(Self {
            schema: SchemaLevel::for_version(version)?.build(defaults),
        })
    }

    /// The schema version of the level the parser dispatches to.
    #[must_use]
    pub fn manifest_version(&self) -> ManifestVersion {
        self.schema.manifest_version()
    }

    pub fn deserialize(&self, response: &Value) -> Result<Vec<Manifest>> {
        schema::deserialize(self.schema.as_ref(), response)
    }

    pub fn deserialize_data(&self, data: &Value) -> Result<Vec<Manifest>> {
        schema::deserialize_data(self.schema.as_ref(), data)
    }

    #[must_use]
    pub fn deserialize_apps_and_features_entries(
        &self,
        entries: &[Value],
    ) -> Vec<AppsAndFeaturesEntry> {
        self.schema
            .apps_and_features_entries(entries, self.schema.as_ref())
    }

    pub fn deserialize_locale(&self, locale: &Value) -> Result<Option<ManifestLocalization>> {
        self.schema.locale(locale, self.schema.as_ref())
    }

    pub fn deserialize_installation_metadata(
        &self,
        metadata: &Value,
    ) -> Result<Option<InstallationMetadata>> {
        self.schema
            .installation_metadata(metadata, self.schema.as_ref())
    }
}

impl Debug for ManifestJsonParser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestJsonParser")
            .field("manifest_version", &self.manifest_version())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;
    use serde_json::{Value, json};
    use strum::VariantArray;
    use winget_types::{
        installer::{Architecture, InstallerType},
        shared::ManifestVersion,
    };

    use crate::{
        error::{InvalidData, RestError},
        parser::ManifestJsonParser,
        schema::SchemaLevel,
    };

    const RESPONSE: &str = indoc! {r#"
        {
            "Data": {
                "PackageIdentifier": "Foo.Bar",
                "Versions": [
                    {
                        "PackageVersion": "1.0",
                        "DefaultLocale": {
                            "PackageLocale": "en-US",
                            "PackageName": "Bar",
                            "Publisher": "Foo Inc",
                            "ShortDescription": "desc"
                        },
                        "Installers": [
                            {
                                "InstallerUrl": "https://x/y.exe",
                                "Architecture": "arm64"
                            },
                            {
                                "InstallerUrl": "https://x/y.msi",
                                "Architecture": "x64",
                                "InstallerType": "msi"
                            }
                        ]
                    }
                ]
            }
        }
    "#};

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn malformed_installer_is_dropped() {
        let parser = ManifestJsonParser::new(ManifestVersion::V1_12).unwrap();
        let manifests = parser.deserialize(&parse(RESPONSE)).unwrap();

        assert_eq!(manifests.len(), 1);
        let installers = &manifests[0].installers;
        assert_eq!(installers.len(), 1);
        assert_eq!(installers[0].architecture, Architecture::X64);
        assert_eq!(installers[0].r#type, InstallerType::Msi);
        assert_eq!(manifests[0].manifest_version, ManifestVersion::V1_12);
    }

    #[rstest]
    fn deserializing_twice_is_equal(#[values("1.0", "1.1", "1.4", "1.9", "1.12")] version: &str) {
        let parser = ManifestJsonParser::new(version.parse().unwrap()).unwrap();
        let response = parse(RESPONSE);
        assert_eq!(
            parser.deserialize(&response).unwrap(),
            parser.deserialize(&response).unwrap()
        );
    }

    #[test]
    fn empty_installers_are_rejected_at_every_level() {
        let mut response = parse(RESPONSE);
        response["Data"]["Versions"][0]["Installers"] = json!([]);

        for &level in SchemaLevel::VARIANTS {
            let parser = ManifestJsonParser::new(level.version()).unwrap();
            assert!(matches!(
                parser.deserialize(&response),
                Err(RestError::InvalidData(InvalidData::NoValidInstallers { .. }))
            ));
        }
    }

    #[test]
    fn missing_data_is_no_manifest() {
        let parser = ManifestJsonParser::new(ManifestVersion::V1_0).unwrap();
        let response = parse(r#"{"ContinuationToken": "abcd"}"#);
        assert!(parser.deserialize(&response).unwrap().is_empty());
    }

    #[test]
    fn null_response_is_invalid_data() {
        let parser = ManifestJsonParser::new(ManifestVersion::V1_0).unwrap();
        assert!(matches!(
            parser.deserialize(&Value::Null),
            Err(RestError::InvalidData(InvalidData::NullResponse))
        ));
    }

    #[rstest]
    #[case(r#"{"Data": {"Versions": []}}"#)]
    #[case(r#"{"Data": {"PackageIdentifier": "Foo.Bar"}}"#)]
    #[case(r#"{"Data": {"PackageIdentifier": "Foo.Bar", "Versions": []}}"#)]
    #[case(r#"{"Data": []}"#)]
    fn incomplete_data_is_invalid(#[case] json: &str) {
        let parser = ManifestJsonParser::new(ManifestVersion::V1_4).unwrap();
        assert!(matches!(
            parser.deserialize(&parse(json)),
            Err(RestError::InvalidData(_))
        ));
    }

    #[test]
    fn deserialize_data() {
        let parser = ManifestJsonParser::new(ManifestVersion::V1_1).unwrap();
        let response = parse(RESPONSE);
        let manifests = parser.deserialize_data(&response["Data"]).unwrap();
        assert_eq!(manifests[0].id, "Foo.Bar");
        assert_eq!(manifests[0].version, "1.0");
    }

    #[test]
    fn minor_versions_between_levels() {
        let parser = ManifestJsonParser::new("1.8".parse().unwrap()).unwrap();
        assert_eq!(parser.manifest_version(), ManifestVersion::V1_7);
    }

    #[test]
    fn unsupported_major_version() {
        assert!(matches!(
            ManifestJsonParser::new(ManifestVersion::from_parts(2, 0, 0)),
            Err(RestError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn apps_and_features_entries() {
        let entries = parse(indoc! {r#"
            [
                { "DisplayName": "Bar", "InstallerType": "msi" },
                {}
            ]
        "#});
        let entries = entries.as_array().unwrap();

        let parser = ManifestJsonParser::new(ManifestVersion::V1_0).unwrap();
        assert!(parser.deserialize_apps_and_features_entries(entries).is_empty());

        let parser = ManifestJsonParser::new(ManifestVersion::V1_1).unwrap();
        let entries = parser.deserialize_apps_and_features_entries(entries);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name.as_deref(), Some("Bar"));
        assert_eq!(entries[0].installer_type, Some(InstallerType::Msi));
    }

    #[test]
    fn locale() {
        let parser = ManifestJsonParser::new(ManifestVersion::V1_0).unwrap();
        let localization = parser
            .deserialize_locale(&parse(r#"{"PackageLocale": "fr-FR", "Publisher": "Foo"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(localization.locale, "fr-FR");
        assert_eq!(localization.publisher(), Some("Foo"));
    }

    #[test]
    fn installation_metadata() {
        let metadata = parse(r#"{"DefaultInstallLocation": "%ProgramFiles%\\Bar"}"#);

        let parser = ManifestJsonParser::new(ManifestVersion::V1_1).unwrap();
        assert!(
            parser
                .deserialize_installation_metadata(&metadata)
                .unwrap()
                .is_none()
        );

        let parser = ManifestJsonParser::new(ManifestVersion::V1_4).unwrap();
        let metadata = parser
            .deserialize_installation_metadata(&metadata)
            .unwrap()
            .unwrap();
        assert_eq!(
            metadata.default_install_location.as_deref(),
            Some("%ProgramFiles%\\Bar")
        );
    }
}
