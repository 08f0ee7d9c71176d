use std::{
    fmt,
    fmt::{Display, Formatter},
};

use bitflags::bitflags;
use serde::{Serialize, Serializer, ser::SerializeSeq};

bitflags! {
    /// A list of installer supported operating systems internally represented as bit flags
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub struct Platform: u8 {
        const WINDOWS_DESKTOP = 1;
        const WINDOWS_UNIVERSAL = 1 << 1;
    }
}

const WINDOWS_DESKTOP: &str = "Windows.Desktop";
const WINDOWS_UNIVERSAL: &str = "Windows.Universal";

impl Platform {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case(WINDOWS_DESKTOP) {
            Some(Self::WINDOWS_DESKTOP)
        } else if value.eq_ignore_ascii_case(WINDOWS_UNIVERSAL) {
            Some(Self::WINDOWS_UNIVERSAL)
        } else {
            None
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Self::WINDOWS_DESKTOP => f.write_str(WINDOWS_DESKTOP),
            Self::WINDOWS_UNIVERSAL => f.write_str(WINDOWS_UNIVERSAL),
            _ => bitflags::parser::to_writer(self, f),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.iter().count()))?;
        for platform in self.iter() {
            match platform {
                Self::WINDOWS_DESKTOP => seq.serialize_element(WINDOWS_DESKTOP)?,
                Self::WINDOWS_UNIVERSAL => seq.serialize_element(WINDOWS_UNIVERSAL)?,
                _ => {}
            }
        }
        seq.end()
    }
}
