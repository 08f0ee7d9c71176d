use derive_more::Display;
use serde::Serialize;

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeBehavior {
    #[default]
    Install,
    UninstallPrevious,
    Deny,
}
