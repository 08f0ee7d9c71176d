use thiserror::Error;
use winget_types::{
    locale::Localization,
    shared::{AuthenticationType, ManifestVersion, Sha256Error},
};

use crate::search::PackageMatchField;

pub mod hresult {
    pub const UNSUPPORTED_REST_SOURCE: u32 = 0x8A15_0038;
    pub const REST_SOURCE_INVALID_DATA: u32 = 0x8A15_0039;
    pub const UNSUPPORTED_SOURCE_REQUEST: u32 = 0x8A15_003A;
    pub const REST_SOURCE_INVALID_VERSION: u32 = 0x8A15_003E;
    pub const AUTHENTICATION_TYPE_NOT_SUPPORTED: u32 = 0x8A15_007E;
    pub const INVALID_AUTHENTICATION_INFO: u32 = 0x8A15_007F;
    /// `HRESULT_FROM_WIN32(ERROR_NOT_SUPPORTED)`
    pub const NOT_SUPPORTED: u32 = 0x8007_0032;
}

pub type Result<T, E = RestError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("The REST source returned invalid data: {0}")]
    InvalidData(#[from] InvalidData),
    #[error("The REST source is not supported: {0}")]
    UnsupportedSource(#[from] UnsupportedSource),
    #[error("The search request is not supported by the REST source: {0}")]
    UnsupportedSourceRequest(#[from] UnsupportedRequest),
    #[error("Invalid authentication info: {0}")]
    InvalidAuthenticationInfo(#[from] AuthenticationError),
    #[error("Authentication type `{0}` is not supported")]
    AuthenticationTypeNotSupported(AuthenticationType),
    #[error("Schema version {0} is not supported")]
    UnsupportedVersion(ManifestVersion),
    #[error("The REST source returned an invalid schema version `{0}`")]
    InvalidVersion(String),
}

impl RestError {
    /// The stable error code surfaced at the API boundary.
    #[must_use]
    pub const fn hresult(&self) -> u32 {
        match self {
            Self::InvalidData(_) => hresult::REST_SOURCE_INVALID_DATA,
            Self::UnsupportedSource(_) => hresult::UNSUPPORTED_REST_SOURCE,
            Self::UnsupportedSourceRequest(_) => hresult::UNSUPPORTED_SOURCE_REQUEST,
            Self::InvalidAuthenticationInfo(_) => hresult::INVALID_AUTHENTICATION_INFO,
            Self::AuthenticationTypeNotSupported(_) => hresult::AUTHENTICATION_TYPE_NOT_SUPPORTED,
            Self::UnsupportedVersion(_) => hresult::NOT_SUPPORTED,
            Self::InvalidVersion(_) => hresult::REST_SOURCE_INVALID_VERSION,
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum InvalidData {
    #[error("the response was null")]
    NullResponse,
    #[error("`Data` was not an object")]
    DataNotObject,
    #[error("`Data` was not an array")]
    DataNotArray,
    #[error("missing `PackageIdentifier`")]
    MissingPackageIdentifier,
    #[error("{package_identifier} has no versions")]
    MissingVersions { package_identifier: String },
    #[error("a version of {package_identifier} has no `PackageVersion`")]
    MissingPackageVersion { package_identifier: String },
    #[error("{package_identifier} {package_version} has no default locale")]
    MissingDefaultLocale {
        package_identifier: String,
        package_version: String,
    },
    #[error("the default locale of {package_identifier} {package_version} has no {field}")]
    IncompleteDefaultLocale {
        package_identifier: String,
        package_version: String,
        field: Localization,
    },
    #[error("{package_identifier} {package_version} has no valid installers")]
    NoValidInstallers {
        package_identifier: String,
        package_version: String,
    },
    #[error(transparent)]
    InvalidSha256(#[from] Sha256Error),
    #[error("a search match is missing `{0}`")]
    IncompleteSearchMatch(&'static str),
    #[error("a search match for {package_identifier} has a version without `PackageVersion`")]
    MissingSearchVersion { package_identifier: String },
}

#[derive(Debug, Error)]
pub enum UnsupportedSource {
    #[error("missing `SourceIdentifier`")]
    MissingSourceIdentifier,
    #[error("missing `ServerSupportedVersions`")]
    MissingServerSupportedVersions,
    #[error("`SourceAgreements` has no `AgreementsIdentifier`")]
    MissingAgreementsIdentifier,
    #[error("invalid source authentication")]
    InvalidAuthentication(#[source] AuthenticationError),
    #[error("no common schema version with server versions {}", .0.join(", "))]
    NoCommonVersion(Vec<String>),
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum UnsupportedRequest {
    #[error("filtering on {0} is not supported")]
    UnsupportedFilter(PackageMatchField),
    #[error("{0} is a required match field")]
    MissingRequiredField(PackageMatchField),
    #[error("query parameter `{0}` is required")]
    MissingRequiredQueryParameter(String),
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum AuthenticationError {
    #[error("`Authentication` has no `AuthenticationType`")]
    MissingType,
    #[error("Microsoft Entra Id authentication has no `Resource`")]
    MissingResource,
    #[error("authentication details do not match type `{0}`")]
    IntegrityViolation(AuthenticationType),
}
