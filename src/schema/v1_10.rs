use serde_json::Value;
use winget_types::{installer::ManifestInstaller, shared::ManifestVersion};

use crate::{
    authentication::{AuthenticationContext, parse_authentication_info},
    defaults::InstallerDefaults,
    error::Result,
    schema::{ManifestSchema, v1_9::V1_9},
};

pub struct V1_10 {
    base: V1_9,
}

impl V1_10 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_9::new(defaults),
        }
    }
}

impl ManifestSchema for V1_10 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_10
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    /// A malformed authentication node fails the whole response rather than dropping the
    /// installer.
    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        let Some(mut installer) = self.base.installer(node, schema)? else {
            return Ok(None);
        };

        installer.authentication =
            parse_authentication_info(node, AuthenticationContext::Installer)?;

        Ok(Some(installer))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde_json::Value;
    use winget_types::shared::AuthenticationType;

    use crate::{
        defaults::InstallerDefaults,
        error::{AuthenticationError, RestError, hresult},
        schema::{ManifestSchema, deserialize, v1_9::V1_9, v1_10::V1_10},
    };

    const RESPONSE: &str = indoc! {r#"
        {
            "Data": {
                "PackageIdentifier": "Foo.Bar",
                "Versions": [
                    {
                        "PackageVersion": "2.0",
                        "DefaultLocale": {
                            "PackageLocale": "en-US",
                            "PackageName": "Bar",
                            "Publisher": "Foo",
                            "ShortDescription": "Bar by Foo"
                        },
                        "Installers": [
                            {
                                "InstallerUrl": "https://x/y.msix",
                                "Architecture": "x64",
                                "InstallerType": "msix",
                                "Authentication": {
                                    "AuthenticationType": "microsoftEntraIdForAzureBlobStorage",
                                    "MicrosoftEntraIdAuthenticationInfo": {
                                        "Resource": "https://storage.azure.com",
                                        "Scope": "user_impersonation"
                                    }
                                }
                            }
                        ]
                    }
                ]
            }
        }
    "#};

    #[test]
    fn installer_authentication() {
        let response = serde_json::from_str::<Value>(RESPONSE).unwrap();
        let manifests = deserialize(&V1_10::new(InstallerDefaults::none()), &response).unwrap();

        let authentication = &manifests[0].installers[0].authentication;
        assert_eq!(
            authentication.r#type,
            AuthenticationType::MicrosoftEntraIdForAzureBlobStorage
        );
        assert_eq!(
            authentication
                .microsoft_entra_id
                .as_ref()
                .map(|info| info.resource.as_str()),
            Some("https://storage.azure.com")
        );
    }

    #[test]
    fn authentication_is_not_read_before_1_10() {
        let response = serde_json::from_str::<Value>(RESPONSE).unwrap();
        let manifests = deserialize(&V1_9::new(InstallerDefaults::none()), &response).unwrap();
        assert!(manifests[0].installers[0].authentication.is_none());
    }

    #[test]
    fn malformed_authentication_fails_response() {
        let response = serde_json::from_str::<Value>(
            &RESPONSE.replace(r#""Resource": "https://storage.azure.com","#, ""),
        )
        .unwrap();
        let schema = V1_10::new(InstallerDefaults::none());

        let error = deserialize(&schema, &response).unwrap_err();

        assert!(matches!(
            error,
            RestError::InvalidAuthenticationInfo(AuthenticationError::MissingResource)
        ));
        assert_eq!(error.hresult(), hresult::INVALID_AUTHENTICATION_INFO);
    }
}
