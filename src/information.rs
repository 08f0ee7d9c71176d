use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;
use tracing::error;
use winget_types::{locale::Agreement, shared::AuthenticationInfo};

use crate::{
    authentication::{AuthenticationContext, parse_authentication_info},
    error::{InvalidData, Result, UnsupportedSource},
    schema::agreement,
    traits::json::JsonExt,
};

const DATA: &str = "Data";
const SOURCE_IDENTIFIER: &str = "SourceIdentifier";
const SERVER_SUPPORTED_VERSIONS: &str = "ServerSupportedVersions";
const SOURCE_AGREEMENTS: &str = "SourceAgreements";
const AGREEMENTS_IDENTIFIER: &str = "AgreementsIdentifier";
const AGREEMENTS: &str = "Agreements";
const REQUIRED_PACKAGE_MATCH_FIELDS: &str = "RequiredPackageMatchFields";
const UNSUPPORTED_PACKAGE_MATCH_FIELDS: &str = "UnsupportedPackageMatchFields";
const REQUIRED_QUERY_PARAMETERS: &str = "RequiredQueryParameters";
const UNSUPPORTED_QUERY_PARAMETERS: &str = "UnsupportedQueryParameters";

/// What a REST source says about itself.
#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Information {
    pub source_identifier: String,
    pub server_supported_versions: Vec<String>,
    pub source_agreements_identifier: Option<String>,
    pub source_agreements: Vec<Agreement>,
    pub required_package_match_fields: Vec<String>,
    pub unsupported_package_match_fields: Vec<String>,
    pub required_query_parameters: Vec<String>,
    pub unsupported_query_parameters: Vec<String>,
    pub authentication: AuthenticationInfo,
}

/// Deserializes an information response.
pub fn deserialize(response: &Value) -> Result<Information> {
    if response.is_null() {
        return Err(InvalidData::NullResponse.into());
    }

    deserialize_data(response.field(DATA).unwrap_or(&Value::Null))
        .inspect_err(|err| error!(%err, "Failed to deserialize information response"))
}

fn deserialize_data(data: &Value) -> Result<Information> {
    let source_identifier = data
        .non_empty_string(SOURCE_IDENTIFIER)
        .ok_or(UnsupportedSource::MissingSourceIdentifier)?;

    let server_supported_versions = data.string_array(SERVER_SUPPORTED_VERSIONS);
    if server_supported_versions.is_empty() {
        return Err(UnsupportedSource::MissingServerSupportedVersions.into());
    }

    let mut information = Information {
        source_identifier: source_identifier.to_owned(),
        server_supported_versions,
        required_package_match_fields: data.string_array(REQUIRED_PACKAGE_MATCH_FIELDS),
        unsupported_package_match_fields: data.string_array(UNSUPPORTED_PACKAGE_MATCH_FIELDS),
        required_query_parameters: data.string_array(REQUIRED_QUERY_PARAMETERS),
        unsupported_query_parameters: data.string_array(UNSUPPORTED_QUERY_PARAMETERS),
        authentication: parse_authentication_info(data, AuthenticationContext::Source)
            .map_err(UnsupportedSource::InvalidAuthentication)?,
        ..Information::default()
    };

    if let Some(source_agreements) = data.object(SOURCE_AGREEMENTS) {
        let identifier = source_agreements
            .non_empty_string(AGREEMENTS_IDENTIFIER)
            .ok_or(UnsupportedSource::MissingAgreementsIdentifier)?;

        information.source_agreements_identifier = Some(identifier.to_owned());
        information.source_agreements = source_agreements
            .array(AGREEMENTS)
            .unwrap_or_default()
            .iter()
            .map(agreement)
            .filter(Agreement::is_any_some)
            .collect();
    }

    Ok(information)
}
