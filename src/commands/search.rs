use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::Result;
use winget_rest::search;
use winget_types::shared::ManifestVersion;

use crate::commands::{is_valid_file, print_json, read_json, with_code};

/// Parse a REST search response and print the matching packages
#[derive(Parser)]
pub struct Search {
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
}

impl Search {
    pub fn run(self) -> Result<()> {
        let response = read_json(&self.file_path)?;
        let result = search::deserialize(self.schema_version, &response).map_err(with_code)?;
        print_json(&result)
    }
}
