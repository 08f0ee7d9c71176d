use std::{
    cmp::Ordering,
    convert::Infallible,
    hash::{Hash, Hasher},
    str::FromStr,
};

use compact_str::CompactString;
use derive_more::Display;
use itertools::{EitherOrBoth, Itertools};
use serde_with::SerializeDisplay;
use smallvec::SmallVec;

/// A package version compared part by part the way winget orders versions.
///
/// Each dot separated part is a number followed by an optional supplement, so `1.2-rc` sorts
/// below `1.2`. Trailing zero parts are insignificant.
#[derive(Clone, Debug, Default, Display, Eq, SerializeDisplay)]
#[display("{raw}")]
pub struct Version {
    raw: CompactString,
    parts: SmallVec<[VersionPart; 4]>,
}

impl Version {
    pub const SEPARATOR: char = '.';

    pub fn new(input: &str) -> Self {
        let mut parts = input
            .trim()
            .split(Self::SEPARATOR)
            .map(VersionPart::new)
            .collect::<SmallVec<[_; 4]>>();

        let droppable_parts = parts
            .iter()
            .rev()
            .take_while(|part| part.is_droppable())
            .count();

        parts.truncate(parts.len() - droppable_parts);

        Self {
            raw: CompactString::from(input),
            parts,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for part in &self.parts {
            part.number.hash(state);
            part.supplement
                .as_deref()
                .map(str::to_ascii_lowercase)
                .hash(state);
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .iter()
            .zip_longest(&other.parts)
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => a.cmp(b),
                EitherOrBoth::Left(a) => a.cmp(&VersionPart::DEFAULT),
                EitherOrBoth::Right(b) => VersionPart::DEFAULT.cmp(b),
            })
            .find(|&ordering| ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

#[derive(Clone, Debug, Eq)]
struct VersionPart {
    number: u64,
    supplement: Option<CompactString>,
}

impl VersionPart {
    const DEFAULT: Self = Self {
        number: 0,
        supplement: None,
    };

    fn new(input: &str) -> Self {
        let input = input.trim();

        let split_index = input
            .find(|char: char| !char.is_ascii_digit())
            .unwrap_or(input.len());

        let (number_str, supplement) = input.split_at(split_index);

        Self {
            number: number_str.parse().unwrap_or_default(),
            supplement: Option::from(supplement)
                .filter(|supplement| !supplement.is_empty())
                .map(CompactString::from),
        }
    }

    const fn is_droppable(&self) -> bool {
        self.number == 0 && self.supplement.is_none()
    }
}

impl PartialEq for VersionPart {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for VersionPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionPart {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number).then_with(|| {
            match (self.supplement.as_deref(), other.supplement.as_deref()) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a
                    .bytes()
                    .map(|byte| byte.to_ascii_lowercase())
                    .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase())),
            }
        })
    }
}
