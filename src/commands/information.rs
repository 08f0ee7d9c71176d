use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::Result;
use tracing::info;
use winget_rest::{information, negotiation};

use crate::commands::{installer_defaults, is_valid_file, print_json, read_json, with_code};

/// Parse a REST information response and print the source's capabilities
#[derive(Parser)]
pub struct Information {
    /// Path to the JSON response body
    #[arg(value_parser = is_valid_file, value_hint = clap::ValueHint::FilePath)]
    file_path: Utf8PathBuf,

    /// Also negotiate the schema version to use with the source
    #[arg(short, long)]
    negotiate: bool,

    /// JSON file of default installer switches and return codes per installer type
    #[arg(long, env = "WINGET_REST_INSTALLER_DEFAULTS", value_parser = is_valid_file)]
    installer_defaults: Option<Utf8PathBuf>,
}

impl Information {
    pub fn run(self) -> Result<()> {
        let response = read_json(&self.file_path)?;
        let information = information::deserialize(&response).map_err(with_code)?;

        if self.negotiate {
            let defaults = installer_defaults(self.installer_defaults.as_deref())?;
            let parser = negotiation::negotiate(&information, defaults).map_err(with_code)?;
            info!(version = %parser.manifest_version(), "Source is supported");
        }

        print_json(&information)
    }
}
