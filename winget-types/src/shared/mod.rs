mod authentication;
mod manifest_version;
mod sha_256;
mod version;

pub use authentication::{
    AuthenticationInfo, AuthenticationType, MicrosoftEntraIdAuthenticationInfo,
};
pub use manifest_version::{ManifestVersion, ManifestVersionError};
pub use sha_256::{Sha256, Sha256Error};
pub use version::Version;
