use std::collections::BTreeMap;

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::installer::ReturnResponse;

/// Installer exit codes as signed 32-bit values. HRESULTs above `i32::MAX` wrap to negative.
pub type InstallerReturnCode = i32;

pub type ExpectedReturnCodes = BTreeMap<InstallerReturnCode, ExpectedReturnCodeInfo>;

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct ExpectedReturnCodeInfo {
    pub return_response: ReturnResponse,
    pub return_response_url: Option<String>,
}

impl ExpectedReturnCodeInfo {
    #[must_use]
    pub const fn new(return_response: ReturnResponse) -> Self {
        Self {
            return_response,
            return_response_url: None,
        }
    }
}
