use serde::Serialize;

#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct Markets {
    pub allowed_markets: Vec<String>,
    pub excluded_markets: Vec<String>,
}

impl Markets {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed_markets.is_empty() && self.excluded_markets.is_empty()
    }
}
