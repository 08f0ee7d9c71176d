use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;
use tracing::{debug, warn};

use crate::{
    error::{Result, UnsupportedRequest},
    information::Information,
    search::{MatchType, PackageMatchField},
};

/// The query parameter that carries the market a search is made for.
pub const MARKET: &str = "Market";

#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RequestMatch {
    #[serde(rename = "KeyWord")]
    pub keyword: String,
    pub match_type: MatchType,
}

impl RequestMatch {
    pub fn new<S: Into<String>>(keyword: S, match_type: MatchType) -> Self {
        Self {
            keyword: keyword.into(),
            match_type,
        }
    }
}

#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PackageMatchFilter {
    pub package_match_field: PackageMatchField,
    pub request_match: RequestMatch,
}

impl PackageMatchFilter {
    pub fn new<S: Into<String>>(
        field: PackageMatchField,
        keyword: S,
        match_type: MatchType,
    ) -> Self {
        Self {
            package_match_field: field,
            request_match: RequestMatch::new(keyword, match_type),
        }
    }
}

/// A structured search against a REST source.
///
/// Inclusions widen a search: a package matches if it matches any of them. Filters narrow it:
/// a package must match all of them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchRequest {
    pub maximum_results: Option<u32>,
    pub query: Option<RequestMatch>,
    pub inclusions: Vec<PackageMatchFilter>,
    pub filters: Vec<PackageMatchFilter>,
}

#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchRequestBody<'request> {
    maximum_results: Option<u32>,
    fetch_all_manifests: Option<bool>,
    query: Option<&'request RequestMatch>,
    inclusions: Option<&'request [PackageMatchFilter]>,
    filters: Option<&'request [PackageMatchFilter]>,
}

impl SearchRequest {
    /// Whether the request has nothing to match on and so asks for every package.
    #[must_use]
    pub fn is_for_everything(&self) -> bool {
        self.query.is_none() && self.inclusions.is_empty() && self.filters.is_empty()
    }

    /// Adapts the request to what a source supports.
    ///
    /// Inclusions on unsupported fields are removed. Filters on unsupported fields and required
    /// fields that are neither filtered nor included fail the request.
    pub fn validate_against(&mut self, information: &Information) -> Result<()> {
        let unsupported = &information.unsupported_package_match_fields;

        self.inclusions.retain(|inclusion| {
            let field = inclusion.package_match_field;
            let supported = !field.is_in(unsupported);
            if !supported {
                debug!(%field, "Removed inclusion on unsupported field");
            }
            supported
        });

        if let Some(filter) = self
            .filters
            .iter()
            .find(|filter| filter.package_match_field.is_in(unsupported))
        {
            return Err(UnsupportedRequest::UnsupportedFilter(filter.package_match_field).into());
        }

        for required in &information.required_package_match_fields {
            let Ok(field) = required.parse::<PackageMatchField>() else {
                warn!(%required, "Ignored unrecognised required match field");
                continue;
            };

            if !self
                .filters
                .iter()
                .chain(&self.inclusions)
                .any(|filter| filter.package_match_field == field)
            {
                return Err(UnsupportedRequest::MissingRequiredField(field).into());
            }
        }

        Ok(())
    }
}

impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Zero means no limit and is left out of the body
        let maximum_results = self.maximum_results.filter(|&maximum| maximum != 0);

        let body = if self.is_for_everything() {
            SearchRequestBody {
                maximum_results,
                fetch_all_manifests: Some(true),
                query: None,
                inclusions: None,
                filters: None,
            }
        } else {
            SearchRequestBody {
                maximum_results,
                fetch_all_manifests: None,
                query: self.query.as_ref(),
                inclusions: non_empty(&self.inclusions),
                filters: non_empty(&self.filters),
            }
        };
        body.serialize(serializer)
    }
}

fn non_empty(filters: &[PackageMatchFilter]) -> Option<&[PackageMatchFilter]> {
    (!filters.is_empty()).then_some(filters)
}

/// The query parameters to send with requests to a source described by `information`.
///
/// A required `Market` parameter is satisfied by `market`. Any other required parameter cannot be
/// provided and fails the request.
pub fn query_parameters(
    information: &Information,
    market: Option<&str>,
) -> Result<Vec<(&'static str, String)>> {
    if let Some(required) = information
        .required_query_parameters
        .iter()
        .find(|parameter| !parameter.eq_ignore_ascii_case(MARKET) || market.is_none())
    {
        return Err(UnsupportedRequest::MissingRequiredQueryParameter(required.clone()).into());
    }

    let market_supported = !information
        .unsupported_query_parameters
        .iter()
        .any(|parameter| parameter.eq_ignore_ascii_case(MARKET));

    Ok(market
        .filter(|_| market_supported)
        .map(|market| (MARKET, market.to_owned()))
        .into_iter()
        .collect())
}
