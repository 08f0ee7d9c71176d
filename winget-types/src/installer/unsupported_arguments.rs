use std::{
    fmt,
    fmt::{Display, Formatter},
};

use bitflags::bitflags;
use serde::{Serialize, Serializer, ser::SerializeSeq};

bitflags! {
    /// A list of unsupported arguments internally represented as bit flags
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub struct UnsupportedArguments: u8 {
        const LOG = 1;
        const LOCATION = 1 << 1;
    }
}

const LOG: &str = "log";
const LOCATION: &str = "location";

impl UnsupportedArguments {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case(LOG) {
            Some(Self::LOG)
        } else if value.eq_ignore_ascii_case(LOCATION) {
            Some(Self::LOCATION)
        } else {
            None
        }
    }
}

impl Display for UnsupportedArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LOG => f.write_str("Log"),
            Self::LOCATION => f.write_str("Location"),
            _ => bitflags::parser::to_writer(self, f),
        }
    }
}

impl Serialize for UnsupportedArguments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.iter().count()))?;
        for unsupported_argument in self.iter() {
            match unsupported_argument {
                Self::LOG => seq.serialize_element(LOG)?,
                Self::LOCATION => seq.serialize_element(LOCATION)?,
                _ => {}
            }
        }
        seq.end()
    }
}
