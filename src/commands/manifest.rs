use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::Result;
use winget_rest::parser::ManifestJsonParser;
use winget_types::shared::ManifestVersion;

use crate::commands::{installer_defaults, is_valid_file, print_json, read_json, with_code};

/// Parse a REST manifest response and print the manifests it describes
#[derive(Parser)]
pub struct Manifest {
    /// Path to the JSON response body
    #[arg(value_parser = is_valid_file, value_hint = clap::ValueHint::FilePath)]
    file_path: Utf8PathBuf,

    /// The schema version the response was produced for
    #[arg(
        short,
        long,
        env = "WINGET_REST_SCHEMA_VERSION",
        default_value_t = ManifestVersion::V1_12
    )]
    schema_version: ManifestVersion,

    /// JSON file of default installer switches and return codes per installer type
    #[arg(long, env = "WINGET_REST_INSTALLER_DEFAULTS", value_parser = is_valid_file)]
    installer_defaults: Option<Utf8PathBuf>,
}

impl Manifest {
    pub fn run(self) -> Result<()> {
        let defaults = installer_defaults(self.installer_defaults.as_deref())?;
        let parser =
            ManifestJsonParser::with_defaults(self.schema_version, defaults).map_err(with_code)?;

        let response = read_json(&self.file_path)?;
        let manifests = parser.deserialize(&response).map_err(with_code)?;

        print_json(&manifests)
    }
}
