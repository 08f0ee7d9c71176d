use serde_json::Value;
use tracing::warn;
use winget_types::{
    installer::{
        ExpectedReturnCodeInfo, InstallationMetadata, InstallerReturnCode, InstallerType,
        ManifestInstaller, MetadataFile, MetadataFileType, NestedInstallerFile, ReturnResponse,
        UnsupportedArguments,
    },
    locale::{Documentation, LocaleField, ManifestLocalization},
    shared::ManifestVersion,
};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{
        ManifestSchema, insert_list_field, insert_string_fields, match_keyword, sha_256,
        v1_1::V1_1,
    },
    traits::json::JsonExt,
};

const PORTABLE: &str = "portable";

const RETURN_RESPONSE_URL: &str = "ReturnResponseUrl";
const NESTED_INSTALLER_TYPE: &str = "NestedInstallerType";
const DISPLAY_INSTALL_WARNINGS: &str = "DisplayInstallWarnings";
const UNSUPPORTED_ARGUMENTS: &str = "UnsupportedArguments";
const NESTED_INSTALLER_FILES: &str = "NestedInstallerFiles";
const RELATIVE_FILE_PATH: &str = "RelativeFilePath";
const PORTABLE_COMMAND_ALIAS: &str = "PortableCommandAlias";

const INSTALLATION_METADATA: &str = "InstallationMetadata";
const DEFAULT_INSTALL_LOCATION: &str = "DefaultInstallLocation";
const FILES: &str = "Files";
const FILE_SHA256: &str = "FileSha256";
const FILE_TYPE: &str = "FileType";
const INVOCATION_PARAMETER: &str = "InvocationParameter";
const DISPLAY_NAME: &str = "DisplayName";

const DOCUMENTATIONS: &str = "Documentations";
const DOCUMENT_LABEL: &str = "DocumentLabel";
const DOCUMENT_URL: &str = "DocumentUrl";

const LOCALE_FIELDS: [(&str, fn(String) -> LocaleField); 2] = [
    ("InstallationNotes", LocaleField::InstallationNotes),
    ("PurchaseUrl", LocaleField::PurchaseUrl),
];

const RETURN_RESPONSES: [(&str, ReturnResponse); 4] = [
    ("custom", ReturnResponse::Custom),
    ("packageInUseByApplication", ReturnResponse::PackageInUseByApplication),
    ("invalidParameter", ReturnResponse::InvalidParameter),
    ("systemNotSupported", ReturnResponse::SystemNotSupported),
];

pub struct V1_4 {
    base: V1_1,
}

impl V1_4 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_1::new(defaults),
        }
    }
}

impl ManifestSchema for V1_4 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_4
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    fn installer_type(&self, value: &str) -> InstallerType {
        if value.eq_ignore_ascii_case(PORTABLE) {
            InstallerType::Portable
        } else {
            self.base.installer_type(value)
        }
    }

    fn return_response(&self, value: &str) -> ReturnResponse {
        match_keyword(value, &RETURN_RESPONSES)
            .unwrap_or_else(|| self.base.return_response(value))
    }

    fn expected_return_code(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Option<(InstallerReturnCode, ExpectedReturnCodeInfo)> {
        self.base
            .expected_return_code(node, schema)
            .map(|(code, mut info)| {
                info.return_response_url = node
                    .non_empty_string(RETURN_RESPONSE_URL)
                    .map(str::to_owned);
                (code, info)
            })
    }

    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        let Some(mut installer) = self.base.installer(node, schema)? else {
            return Ok(None);
        };

        installer.nested_installer_type = node
            .string(NESTED_INSTALLER_TYPE)
            .map(|nested_type| schema.installer_type(nested_type));
        installer.display_install_warnings =
            node.bool(DISPLAY_INSTALL_WARNINGS).unwrap_or_default();
        installer.unsupported_arguments = node
            .string_array(UNSUPPORTED_ARGUMENTS)
            .iter()
            .filter_map(|argument| UnsupportedArguments::from_wire(argument))
            .collect();

        for file in node.array(NESTED_INSTALLER_FILES).unwrap_or_default() {
            let Some(relative_file_path) = file.non_empty_string(RELATIVE_FILE_PATH) else {
                warn!(url = %installer.url, "Nested installer file has no relative file path");
                return Ok(None);
            };

            installer.nested_installer_files.push(NestedInstallerFile {
                relative_file_path: relative_file_path.to_owned(),
                portable_command_alias: file
                    .non_empty_string(PORTABLE_COMMAND_ALIAS)
                    .map(str::to_owned),
            });
        }

        if let Some(metadata) = node.object(INSTALLATION_METADATA) {
            installer.installation_metadata = schema.installation_metadata(metadata, schema)?;
        }

        Ok(Some(installer))
    }

    fn locale(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestLocalization>> {
        let Some(mut localization) = self.base.locale(node, schema)? else {
            return Ok(None);
        };

        insert_string_fields(&mut localization, node, &LOCALE_FIELDS);

        let documentations = node
            .array(DOCUMENTATIONS)
            .unwrap_or_default()
            .iter()
            .map(|documentation| Documentation {
                document_label: documentation
                    .non_empty_string(DOCUMENT_LABEL)
                    .map(str::to_owned),
                document_url: documentation.non_empty_string(DOCUMENT_URL).map(str::to_owned),
            })
            .filter(Documentation::is_any_some)
            .collect();
        insert_list_field(&mut localization, documentations, LocaleField::Documentations);

        Ok(Some(localization))
    }

    /// Parses installation metadata. A file without a relative path discards the whole metadata.
    fn installation_metadata(
        &self,
        node: &Value,
        _schema: &dyn ManifestSchema,
    ) -> Result<Option<InstallationMetadata>> {
        if !node.is_object() {
            return Ok(None);
        }

        let mut files = Vec::new();
        for file in node.array(FILES).unwrap_or_default() {
            let Some(relative_file_path) = file.non_empty_string(RELATIVE_FILE_PATH) else {
                warn!("Installation metadata file has no relative file path");
                return Ok(None);
            };

            files.push(MetadataFile {
                relative_file_path: relative_file_path.to_owned(),
                file_sha_256: sha_256(file, FILE_SHA256)?,
                file_type: file
                    .non_empty_string(FILE_TYPE)
                    .map(MetadataFileType::from_wire)
                    .unwrap_or_default(),
                invocation_parameter: file
                    .non_empty_string(INVOCATION_PARAMETER)
                    .map(str::to_owned),
                display_name: file.non_empty_string(DISPLAY_NAME).map(str::to_owned),
            });
        }

        Ok(Some(InstallationMetadata {
            default_install_location: node
                .non_empty_string(DEFAULT_INSTALL_LOCATION)
                .map(str::to_owned),
            files,
        }))
    }
}
