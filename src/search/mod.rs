mod request;
mod response;

use derive_more::Display;
use serde::Serialize;
use strum::{AsRefStr, EnumString, VariantArray};

pub use crate::search::{
    request::{MARKET, PackageMatchFilter, RequestMatch, SearchRequest, query_parameters},
    response::{PackageMatch, SearchResult, VersionInfo, deserialize},
};

/// A package attribute a search can match against.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum PackageMatchField {
    PackageIdentifier,
    PackageName,
    Moniker,
    Command,
    Tag,
    PackageFamilyName,
    ProductCode,
    NormalizedPackageNameAndPublisher,
    Market,
    UpgradeCode,
}

impl PackageMatchField {
    /// Whether `names` contains this field, compared case-insensitively.
    fn is_in<S: AsRef<str>>(self, names: &[S]) -> bool {
        names
            .iter()
            .any(|name| name.as_ref().eq_ignore_ascii_case(self.as_ref()))
    }
}

/// How a keyword is compared against a package attribute.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumString,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum MatchType {
    #[default]
    Exact,
    CaseInsensitive,
    StartsWith,
    Substring,
    Wildcard,
    Fuzzy,
    FuzzySubstring,
}
