pub mod information;
pub mod manifest;
pub mod query;
pub mod search;

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    Report, Section,
    eyre::{Result, bail},
};
use serde::Serialize;
use serde_json::Value;
use winget_rest::{defaults::InstallerDefaults, error::RestError};

/// Attaches the stable error code of a REST deserialization failure.
pub fn with_code(error: RestError) -> Report {
    let code = error.hresult();
    Report::new(error).with_note(|| format!("Error code: {code:#010X}"))
}

pub fn is_valid_file(path: &str) -> Result<Utf8PathBuf> {
    let path = Utf8Path::new(path);
    if !path.exists() {
        bail!("{path} does not exist")
    }
    if !path.is_file() {
        bail!("{path} is not a file")
    }
    Ok(path.to_path_buf())
}

pub fn read_json(path: &Utf8Path) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn installer_defaults(path: Option<&Utf8Path>) -> Result<InstallerDefaults> {
    let Some(path) = path else {
        return Ok(InstallerDefaults::default());
    };

    InstallerDefaults::from_json(&fs::read_to_string(path)?)
        .map_err(|err| Report::new(err).wrap_err(format!("Invalid installer defaults in {path}")))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
