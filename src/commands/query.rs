use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use tracing::info;
use winget_rest::search::{
    MatchType, PackageMatchField, PackageMatchFilter, RequestMatch, SearchRequest,
    query_parameters,
};

use crate::commands::{is_valid_file, print_json, read_json, with_code};

/// Compose a REST search request body and print it
#[derive(Parser)]
pub struct Query {
    /// Free-text keyword to search for
    #[arg(short, long)]
    keyword: Option<String>,

    /// How keywords are matched
    #[arg(short, long, default_value_t = MatchType::Exact)]
    match_type: MatchType,

    /// Package fields to include matches on, as `Field=Keyword`
    #[arg(short, long = "inclusion", value_parser = parse_filter)]
    inclusions: Vec<(PackageMatchField, String)>,

    /// Package fields every match must satisfy, as `Field=Keyword`
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(PackageMatchField, String)>,

    /// The maximum number of results the source should return
    #[arg(long)]
    maximum_results: Option<u32>,

    /// Path to an information response to validate the request against
    #[arg(long, value_parser = is_valid_file)]
    information: Option<Utf8PathBuf>,

    /// The market to search in
    #[arg(long)]
    market: Option<String>,
}

impl Query {
    pub fn run(self) -> Result<()> {
        let match_type = self.match_type;
        let to_filters = |pairs: Vec<(PackageMatchField, String)>| -> Vec<PackageMatchFilter> {
            pairs
                .into_iter()
                .map(|(field, keyword)| PackageMatchFilter::new(field, keyword, match_type))
                .collect()
        };

        let mut request = SearchRequest {
            maximum_results: self.maximum_results,
            query: self
                .keyword
                .map(|keyword| RequestMatch::new(keyword, match_type)),
            inclusions: to_filters(self.inclusions),
            filters: to_filters(self.filters),
        };

        if let Some(path) = self.information {
            let information =
                winget_rest::information::deserialize(&read_json(&path)?).map_err(with_code)?;
            request.validate_against(&information).map_err(with_code)?;
            for (name, value) in
                query_parameters(&information, self.market.as_deref()).map_err(with_code)?
            {
                info!(name, %value, "Query parameter");
            }
        }

        print_json(&request)
    }
}

fn parse_filter(value: &str) -> Result<(PackageMatchField, String)> {
    let (field, keyword) = value
        .split_once('=')
        .ok_or_else(|| eyre!("Expected `Field=Keyword`, got `{value}`"))?;
    Ok((field.trim().parse()?, keyword.to_owned()))
}
