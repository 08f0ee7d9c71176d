use strum::VariantArray;
use tracing::{debug, info};
use winget_types::shared::{AuthenticationType, ManifestVersion};

use crate::{
    defaults::InstallerDefaults,
    error::{AuthenticationError, RestError, Result, UnsupportedSource},
    information::Information,
    parser::ManifestJsonParser,
    schema::SchemaLevel,
};

/// The schema versions this crate can deserialize.
pub fn supported_versions() -> impl Iterator<Item = ManifestVersion> {
    SchemaLevel::VARIANTS.iter().map(|level| level.version())
}

/// The highest version supported by both the server and the client.
///
/// Versions are compared on their major and minor parts only. The client's version is returned.
/// Server versions that cannot be parsed are ignored.
pub fn latest_common_version<S, I>(
    server_versions: &[S],
    client_versions: I,
) -> Option<ManifestVersion>
where
    S: AsRef<str>,
    I: IntoIterator<Item = ManifestVersion>,
{
    let server_versions = server_versions
        .iter()
        .filter_map(|version| {
            let version = version.as_ref();
            version
                .parse::<ManifestVersion>()
                .inspect_err(|err| debug!(version, %err, "Ignored unparsable server version"))
                .ok()
        })
        .collect::<Vec<_>>();

    client_versions
        .into_iter()
        .filter(|client| {
            server_versions.iter().any(|server| {
                server.major() == client.major() && server.minor() == client.minor()
            })
        })
        .max()
}

/// Builds a parser for `version` after checking the source's authentication can be satisfied.
pub fn supported_parser(
    information: &Information,
    version: ManifestVersion,
    defaults: InstallerDefaults,
) -> Result<ManifestJsonParser> {
    let authentication = &information.authentication;
    match authentication.r#type {
        AuthenticationType::None | AuthenticationType::MicrosoftEntraId => {}
        r#type => return Err(RestError::AuthenticationTypeNotSupported(r#type)),
    }

    if !authentication.validate_integrity() {
        return Err(AuthenticationError::IntegrityViolation(authentication.r#type).into());
    }

    if !supported_versions().any(|supported| supported == version) {
        return Err(RestError::InvalidVersion(version.to_string()));
    }

    ManifestJsonParser::with_defaults(version, defaults)
}

/// Picks the latest version shared with the source and builds its parser.
pub fn negotiate(
    information: &Information,
    defaults: InstallerDefaults,
) -> Result<ManifestJsonParser> {
    let server_versions = &information.server_supported_versions;
    let version = latest_common_version(server_versions, supported_versions())
        .ok_or_else(|| UnsupportedSource::NoCommonVersion(server_versions.clone()))?;

    info!(
        source = %information.source_identifier,
        %version,
        "Negotiated schema version"
    );

    supported_parser(information, version, defaults)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use winget_types::shared::{
        AuthenticationInfo, AuthenticationType, ManifestVersion, MicrosoftEntraIdAuthenticationInfo,
    };

    use crate::{
        defaults::InstallerDefaults,
        error::{AuthenticationError, RestError, UnsupportedSource, hresult},
        information::Information,
        negotiation::{latest_common_version, negotiate, supported_parser},
    };

    fn versions(versions: &[&str]) -> Vec<ManifestVersion> {
        versions
            .iter()
            .map(|version| version.parse().unwrap())
            .collect()
    }

    #[fixture]
    fn information() -> Information {
        Information {
            source_identifier: "Source123".to_owned(),
            server_supported_versions: vec!["1.0.0".to_owned(), "1.7.0".to_owned()],
            ..Information::default()
        }
    }

    #[rstest]
    #[case(&["1.0.0", "2.0.0", "1.2.0"], &["1.0.0", "1.2.0"], Some("1.2.0"))]
    #[case(&["1.0.0", "2.0.0", "1.2.1"], &["1.0.0", "1.2.0"], Some("1.2.0"))]
    #[case(&["1.0.0", "2.0.0"], &["3.0.0", "4.2.0"], None)]
    #[case(&["1.0.0", "not a version", "1.10.0"], &["1.0.0", "1.9.0", "1.10.0"], Some("1.10.0"))]
    #[case(&[], &["1.0.0"], None)]
    fn latest_common(
        #[case] server: &[&str],
        #[case] client: &[&str],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            latest_common_version(server, versions(client)),
            expected.map(|version| version.parse().unwrap())
        );
    }

    #[rstest]
    fn negotiates_latest_shared_level(information: Information) {
        let parser = negotiate(&information, InstallerDefaults::default()).unwrap();
        assert_eq!(parser.manifest_version(), ManifestVersion::V1_7);
    }

    #[rstest]
    fn no_common_version(mut information: Information) {
        information.server_supported_versions = vec!["2.0.0".to_owned()];
        let error = negotiate(&information, InstallerDefaults::default()).unwrap_err();
        assert!(matches!(
            error,
            RestError::UnsupportedSource(UnsupportedSource::NoCommonVersion(_))
        ));
        assert_eq!(error.hresult(), hresult::UNSUPPORTED_REST_SOURCE);
    }

    #[rstest]
    fn unknown_authentication_type(mut information: Information) {
        information.authentication.r#type = AuthenticationType::Unknown;
        let error = negotiate(&information, InstallerDefaults::default()).unwrap_err();
        assert!(matches!(
            error,
            RestError::AuthenticationTypeNotSupported(AuthenticationType::Unknown)
        ));
        assert_eq!(error.hresult(), hresult::AUTHENTICATION_TYPE_NOT_SUPPORTED);
    }

    #[rstest]
    fn entra_id_without_details(mut information: Information) {
        information.authentication.r#type = AuthenticationType::MicrosoftEntraId;
        let error = negotiate(&information, InstallerDefaults::default()).unwrap_err();
        assert!(matches!(
            error,
            RestError::InvalidAuthenticationInfo(AuthenticationError::IntegrityViolation(_))
        ));
        assert_eq!(error.hresult(), hresult::INVALID_AUTHENTICATION_INFO);
    }

    #[rstest]
    fn entra_id(mut information: Information) {
        information.authentication = AuthenticationInfo {
            r#type: AuthenticationType::MicrosoftEntraId,
            microsoft_entra_id: Some(MicrosoftEntraIdAuthenticationInfo {
                resource: "GUID".to_owned(),
                scope: None,
            }),
        };
        assert!(negotiate(&information, InstallerDefaults::default()).is_ok());
    }

    #[rstest]
    fn unsupported_explicit_version(information: Information) {
        let error = supported_parser(
            &information,
            ManifestVersion::from_parts(1, 13, 0),
            InstallerDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(error, RestError::InvalidVersion(_)));
        assert_eq!(error.hresult(), hresult::REST_SOURCE_INVALID_VERSION);
    }
}
