use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};
use winget_types::{
    installer::{
        AppsAndFeaturesEntry, Architecture, ElevationRequirement, ExpectedReturnCodeInfo,
        InstallerReturnCode, InstallerType, ManifestInstaller, Markets, ReturnResponse,
        UpgradeBehavior,
    },
    locale::{Agreement, LocaleField, ManifestLocalization},
    shared::ManifestVersion,
};

use crate::{
    defaults::InstallerDefaults,
    error::Result,
    schema::{
        ManifestSchema, insert_list_field, insert_string_fields, match_keyword, return_code,
        v1_0::V1_0,
    },
    traits::json::JsonExt,
};

const MS_STORE: &str = "msstore";
const DENY: &str = "deny";

const MS_STORE_PRODUCT_IDENTIFIER: &str = "MSStoreProductIdentifier";
const RELEASE_DATE: &str = "ReleaseDate";
const INSTALLER_ABORTS_TERMINAL: &str = "InstallerAbortsTerminal";
const INSTALL_LOCATION_REQUIRED: &str = "InstallLocationRequired";
const REQUIRE_EXPLICIT_UPGRADE: &str = "RequireExplicitUpgrade";
const ELEVATION_REQUIREMENT: &str = "ElevationRequirement";
const UNSUPPORTED_OS_ARCHITECTURES: &str = "UnsupportedOSArchitectures";
const APPS_AND_FEATURES_ENTRIES: &str = "AppsAndFeaturesEntries";
const MARKETS: &str = "Markets";
const ALLOWED_MARKETS: &str = "AllowedMarkets";
const EXCLUDED_MARKETS: &str = "ExcludedMarkets";
const EXPECTED_RETURN_CODES: &str = "ExpectedReturnCodes";
const INSTALLER_RETURN_CODE: &str = "InstallerReturnCode";
const RETURN_RESPONSE: &str = "ReturnResponse";

const DISPLAY_NAME: &str = "DisplayName";
const PUBLISHER: &str = "Publisher";
const DISPLAY_VERSION: &str = "DisplayVersion";
const PRODUCT_CODE: &str = "ProductCode";
const UPGRADE_CODE: &str = "UpgradeCode";
const INSTALLER_TYPE: &str = "InstallerType";

const AGREEMENTS: &str = "Agreements";
const AGREEMENT_LABEL: &str = "AgreementLabel";
const AGREEMENT: &str = "Agreement";
const AGREEMENT_URL: &str = "AgreementUrl";

const LOCALE_FIELDS: [(&str, fn(String) -> LocaleField); 2] = [
    ("ReleaseNotes", LocaleField::ReleaseNotes),
    ("ReleaseNotesUrl", LocaleField::ReleaseNotesUrl),
];

const RETURN_RESPONSES: [(&str, ReturnResponse); 15] = [
    ("packageInUse", ReturnResponse::PackageInUse),
    ("installInProgress", ReturnResponse::InstallInProgress),
    ("fileInUse", ReturnResponse::FileInUse),
    ("missingDependency", ReturnResponse::MissingDependency),
    ("diskFull", ReturnResponse::DiskFull),
    ("insufficientMemory", ReturnResponse::InsufficientMemory),
    ("noNetwork", ReturnResponse::NoNetwork),
    ("contactSupport", ReturnResponse::ContactSupport),
    ("rebootRequiredToFinish", ReturnResponse::RebootRequiredToFinish),
    ("rebootRequiredForInstall", ReturnResponse::RebootRequiredForInstall),
    ("rebootInitiated", ReturnResponse::RebootInitiated),
    ("cancelledByUser", ReturnResponse::CancelledByUser),
    ("alreadyInstalled", ReturnResponse::AlreadyInstalled),
    ("downgrade", ReturnResponse::Downgrade),
    ("blockedByPolicy", ReturnResponse::BlockedByPolicy),
];

pub struct V1_1 {
    base: V1_0,
}

impl V1_1 {
    #[must_use]
    pub const fn new(defaults: InstallerDefaults) -> Self {
        Self {
            base: V1_0::new(defaults),
        }
    }
}

impl ManifestSchema for V1_1 {
    fn manifest_version(&self) -> ManifestVersion {
        ManifestVersion::V1_1
    }

    fn base(&self) -> Option<&dyn ManifestSchema> {
        Some(&self.base)
    }

    fn installer_type(&self, value: &str) -> InstallerType {
        if value.eq_ignore_ascii_case(MS_STORE) {
            InstallerType::MsStore
        } else {
            self.base.installer_type(value)
        }
    }

    fn upgrade_behavior(&self, value: &str) -> Option<UpgradeBehavior> {
        if value.eq_ignore_ascii_case(DENY) {
            Some(UpgradeBehavior::Deny)
        } else {
            self.base.upgrade_behavior(value)
        }
    }

    fn return_response(&self, value: &str) -> ReturnResponse {
        match_keyword(value, &RETURN_RESPONSES).unwrap_or_default()
    }

    fn expected_return_code(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Option<(InstallerReturnCode, ExpectedReturnCodeInfo)> {
        let code = node
            .int(INSTALLER_RETURN_CODE)
            .and_then(return_code)
            .filter(|&code| code != 0)?;
        let response = node
            .non_empty_string(RETURN_RESPONSE)
            .map(|response| schema.return_response(response))
            .filter(|&response| response != ReturnResponse::Unknown)?;
        Some((code, ExpectedReturnCodeInfo::new(response)))
    }

    fn installer(
        &self,
        node: &Value,
        schema: &dyn ManifestSchema,
    ) -> Result<Option<ManifestInstaller>> {
        let Some(mut installer) = self.base.installer(node, schema)? else {
            return Ok(None);
        };

        installer.product_id = node
            .non_empty_string(MS_STORE_PRODUCT_IDENTIFIER)
            .map(str::to_owned);
        installer.release_date = node.non_empty_string(RELEASE_DATE).and_then(release_date);
        installer.aborts_terminal = node.bool(INSTALLER_ABORTS_TERMINAL).unwrap_or_default();
        installer.install_location_required =
            node.bool(INSTALL_LOCATION_REQUIRED).unwrap_or_default();
        installer.require_explicit_upgrade =
            node.bool(REQUIRE_EXPLICIT_UPGRADE).unwrap_or_default();
        installer.elevation_requirement = node
            .non_empty_string(ELEVATION_REQUIREMENT)
            .map(ElevationRequirement::from_wire)
            .filter(|&requirement| requirement != ElevationRequirement::Unknown);

        for architecture in node.string_array(UNSUPPORTED_OS_ARCHITECTURES) {
            match Architecture::from_wire(&architecture) {
                Architecture::Neutral => {
                    warn!(url = %installer.url, "Unsupported OS architectures contain neutral");
                    return Ok(None);
                }
                Architecture::Unknown => {
                    debug!(%architecture, "Skipped unknown unsupported OS architecture");
                }
                architecture => {
                    installer.unsupported_os_architectures.insert(architecture);
                }
            }
        }

        if let Some(entries) = node.array(APPS_AND_FEATURES_ENTRIES) {
            installer.apps_and_features_entries = schema.apps_and_features_entries(entries, schema);
        }

        if let Some(markets) = node.object(MARKETS) {
            installer.markets = Markets {
                allowed_markets: markets.string_array(ALLOWED_MARKETS),
                excluded_markets: markets.string_array(EXCLUDED_MARKETS),
            };
        }

        for entry in node.array(EXPECTED_RETURN_CODES).unwrap_or_default() {
            let Some((code, info)) = schema.expected_return_code(entry, schema) else {
                continue;
            };

            if installer.expected_return_codes.insert(code, info).is_some() {
                warn!(url = %installer.url, code, "Expected return codes contain a duplicate");
                return Ok(None);
            }
        }

        Ok(Some(installer))
    }

    fn finalize_installer(&self, installer: &mut ManifestInstaller) {
        self.base.finalize_installer(installer);
        self.defaults().apply_return_codes(installer);
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

        let agreements = node
            .array(AGREEMENTS)
            .unwrap_or_default()
            .iter()
            .map(agreement)
            .filter(Agreement::is_any_some)
            .collect();
        insert_list_field(&mut localization, agreements, LocaleField::Agreements);

        Ok(Some(localization))
    }

    fn apps_and_features_entries(
        &self,
        entries: &[Value],
        schema: &dyn ManifestSchema,
    ) -> Vec<AppsAndFeaturesEntry> {
        entries
            .iter()
            .map(|entry| AppsAndFeaturesEntry {
                display_name: entry.non_empty_string(DISPLAY_NAME).map(str::to_owned),
                publisher: entry.non_empty_string(PUBLISHER).map(str::to_owned),
                display_version: entry.non_empty_string(DISPLAY_VERSION).map(str::to_owned),
                product_code: entry.non_empty_string(PRODUCT_CODE).map(str::to_owned),
                upgrade_code: entry.non_empty_string(UPGRADE_CODE).map(str::to_owned),
                installer_type: entry
                    .non_empty_string(INSTALLER_TYPE)
                    .map(|installer_type| schema.installer_type(installer_type))
                    .filter(|&installer_type| installer_type != InstallerType::Unknown),
            })
            .filter(AppsAndFeaturesEntry::is_any_some)
            .collect()
    }
}

pub(crate) fn agreement(node: &Value) -> Agreement {
    Agreement {
        label: node.non_empty_string(AGREEMENT_LABEL).map(str::to_owned),
        text: node.non_empty_string(AGREEMENT).map(str::to_owned),
        url: node.non_empty_string(AGREEMENT_URL).map(str::to_owned),
    }
}

/// Parses the date part of a release date, which may carry a time component.
fn release_date(value: &str) -> Option<NaiveDate> {
    let date = value.split_once('T').map_or(value, |(date, _)| date);
    date.parse()
        .inspect_err(|err| debug!(value, %err, "Ignored unparsable release date"))
        .ok()
}
