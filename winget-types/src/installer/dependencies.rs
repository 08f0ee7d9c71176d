use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::shared::Version;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum DependencyType {
    WindowsFeature,
    WindowsLibrary,
    Package,
    External,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dependency {
    pub r#type: DependencyType,
    pub id: String,
    pub minimum_version: Option<Version>,
}

impl Dependency {
    pub fn new<S: Into<String>>(r#type: DependencyType, id: S) -> Self {
        Self {
            r#type,
            id: id.into(),
            minimum_version: None,
        }
    }

    #[must_use]
    pub fn with_minimum_version(mut self, minimum_version: Version) -> Self {
        self.minimum_version = Some(minimum_version);
        self
    }

    fn is_same_as(&self, other: &Self) -> bool {
        self.r#type == other.r#type && self.id.eq_ignore_ascii_case(&other.id)
    }
}

/// Dependencies of an installer, in the order they were first declared.
///
/// Each `(type, id)` pair appears at most once. Adding a duplicate keeps the higher minimum version.
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq, IntoIterator, Serialize)]
pub struct DependencyList(#[into_iterator(owned, ref)] Vec<Dependency>);

impl DependencyList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, dependency: Dependency) {
        match self
            .0
            .iter_mut()
            .find(|existing| existing.is_same_as(&dependency))
        {
            Some(existing) => {
                if dependency.minimum_version > existing.minimum_version {
                    existing.minimum_version = dependency.minimum_version;
                }
            }
            None => self.0.push(dependency),
        }
    }

    pub fn dependencies(&self, r#type: DependencyType) -> impl Iterator<Item = &Dependency> {
        self.0
            .iter()
            .filter(move |dependency| dependency.r#type == r#type)
    }
}

impl Extend<Dependency> for DependencyList {
    fn extend<T: IntoIterator<Item = Dependency>>(&mut self, iter: T) {
        for dependency in iter {
            self.add(dependency);
        }
    }
}
