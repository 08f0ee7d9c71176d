use serde::Serialize;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct Documentation {
    pub document_label: Option<String>,
    pub document_url: Option<String>,
}

impl Documentation {
    #[must_use]
    pub const fn is_any_some(&self) -> bool {
        self.document_label.is_some() || self.document_url.is_some()
    }
}
