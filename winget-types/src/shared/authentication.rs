use derive_more::Display;
use serde::Serialize;
use serde_with::skip_serializing_none;
use strum::EnumString;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum AuthenticationType {
    #[strum(disabled)]
    Unknown,
    #[default]
    None,
    MicrosoftEntraId,
    MicrosoftEntraIdForAzureBlobStorage,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MicrosoftEntraIdAuthenticationInfo {
    pub resource: String,
    pub scope: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationInfo {
    #[serde(rename = "AuthenticationType")]
    pub r#type: AuthenticationType,
    #[serde(rename = "MicrosoftEntraIdAuthenticationInfo")]
    pub microsoft_entra_id: Option<MicrosoftEntraIdAuthenticationInfo>,
}

impl AuthenticationInfo {
    /// Checks that the populated details match the declared authentication type.
    #[must_use]
    pub fn validate_integrity(&self) -> bool {
        match self.r#type {
            AuthenticationType::MicrosoftEntraId
            | AuthenticationType::MicrosoftEntraIdForAzureBlobStorage => self
                .microsoft_entra_id
                .as_ref()
                .is_some_and(|info| !info.resource.is_empty()),
            AuthenticationType::None | AuthenticationType::Unknown => true,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self.r#type, AuthenticationType::None)
    }
}
