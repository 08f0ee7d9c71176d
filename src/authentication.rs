use serde_json::Value;
use tracing::warn;
use winget_types::shared::{
    AuthenticationInfo, AuthenticationType, MicrosoftEntraIdAuthenticationInfo,
};

use crate::{error::AuthenticationError, traits::json::JsonExt};

const AUTHENTICATION: &str = "Authentication";
const AUTHENTICATION_TYPE: &str = "AuthenticationType";
const MICROSOFT_ENTRA_ID_AUTHENTICATION_INFO: &str = "MicrosoftEntraIdAuthenticationInfo";
const RESOURCE: &str = "Resource";
const SCOPE: &str = "Scope";

/// Where an authentication node was found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthenticationContext {
    Source,
    Installer,
}

impl AuthenticationContext {
    fn convert_type(self, value: &str) -> AuthenticationType {
        match value.parse::<AuthenticationType>() {
            // Blob storage authentication only applies to downloading installers
            Ok(AuthenticationType::MicrosoftEntraIdForAzureBlobStorage) if self == Self::Source => {
                AuthenticationType::Unknown
            }
            Ok(r#type) => r#type,
            Err(_) => AuthenticationType::Unknown,
        }
    }
}

/// Parses the optional `Authentication` child of `node`.
///
/// An absent node means no authentication. A node that is present but malformed is an error
/// rather than being downgraded to no authentication.
pub fn parse_authentication_info(
    node: &Value,
    context: AuthenticationContext,
) -> Result<AuthenticationInfo, AuthenticationError> {
    let Some(authentication) = node.object(AUTHENTICATION) else {
        return Ok(AuthenticationInfo::default());
    };

    let r#type = authentication
        .non_empty_string(AUTHENTICATION_TYPE)
        .map(|value| context.convert_type(value))
        .ok_or(AuthenticationError::MissingType)?;

    let microsoft_entra_id = match r#type {
        AuthenticationType::MicrosoftEntraId
        | AuthenticationType::MicrosoftEntraIdForAzureBlobStorage => {
            let info = authentication.object(MICROSOFT_ENTRA_ID_AUTHENTICATION_INFO);
            let resource = info
                .and_then(|info| info.non_empty_string(RESOURCE))
                .ok_or(AuthenticationError::MissingResource)?;
            Some(MicrosoftEntraIdAuthenticationInfo {
                resource: resource.to_owned(),
                scope: info
                    .and_then(|info| info.non_empty_string(SCOPE))
                    .map(str::to_owned),
            })
        }
        AuthenticationType::Unknown => {
            warn!(?context, "Unrecognised authentication type");
            None
        }
        AuthenticationType::None => None,
    };

    let info = AuthenticationInfo {
        r#type,
        microsoft_entra_id,
    };

    if info.validate_integrity() {
        Ok(info)
    } else {
        Err(AuthenticationError::IntegrityViolation(r#type))
    }
}
