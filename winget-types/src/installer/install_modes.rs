use std::{
    fmt,
    fmt::{Display, Formatter},
};

use bitflags::bitflags;
use serde::{Serialize, Serializer, ser::SerializeSeq};

bitflags! {
    /// A list of supported installer modes internally represented as bit flags
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub struct InstallModes: u8 {
        const INTERACTIVE = 1;
        const SILENT = 1 << 1;
        const SILENT_WITH_PROGRESS = 1 << 2;
    }
}

const INTERACTIVE: &str = "interactive";
const SILENT: &str = "silent";
const SILENT_WITH_PROGRESS: &str = "silentWithProgress";

impl InstallModes {
    /// Matches a single wire keyword case-insensitively.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        [
            (INTERACTIVE, Self::INTERACTIVE),
            (SILENT, Self::SILENT),
            (SILENT_WITH_PROGRESS, Self::SILENT_WITH_PROGRESS),
        ]
        .into_iter()
        .find_map(|(keyword, mode)| value.eq_ignore_ascii_case(keyword).then_some(mode))
    }
}

impl Display for InstallModes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INTERACTIVE => f.write_str("Interactive"),
            Self::SILENT => f.write_str("Silent"),
            Self::SILENT_WITH_PROGRESS => f.write_str("Silent with progress"),
            _ => bitflags::parser::to_writer(self, f),
        }
    }
}

impl Serialize for InstallModes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.iter().count()))?;
        for mode in self.iter() {
            match mode {
                Self::INTERACTIVE => seq.serialize_element(INTERACTIVE)?,
                Self::SILENT => seq.serialize_element(SILENT)?,
                Self::SILENT_WITH_PROGRESS => seq.serialize_element(SILENT_WITH_PROGRESS)?,
                _ => {}
            }
        }
        seq.end()
    }
}
