use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum InstallerSwitchType {
    Silent,
    SilentWithProgress,
    Interactive,
    InstallLocation,
    Log,
    Upgrade,
    Custom,
    Repair,
}

pub type InstallerSwitches = BTreeMap<InstallerSwitchType, String>;
