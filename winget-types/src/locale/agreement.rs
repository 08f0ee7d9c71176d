use serde::Serialize;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct Agreement {
    #[serde(rename = "AgreementLabel")]
    pub label: Option<String>,
    #[serde(rename = "Agreement")]
    pub text: Option<String>,
    #[serde(rename = "AgreementUrl")]
    pub url: Option<String>,
}

impl Agreement {
    #[must_use]
    pub const fn is_any_some(&self) -> bool {
        self.label.is_some() || self.text.is_some() || self.url.is_some()
    }
}
