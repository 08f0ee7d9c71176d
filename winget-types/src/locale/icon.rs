use derive_more::Display;
use serde::Serialize;
use serde_with::skip_serializing_none;
use strum::EnumString;

use crate::shared::Sha256;

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "PascalCase")]
pub struct Icon {
    #[serde(rename = "IconUrl")]
    pub url: String,
    #[serde(rename = "IconFileType")]
    pub file_type: IconFileType,
    #[serde(rename = "IconResolution")]
    pub resolution: Option<IconResolution>,
    #[serde(rename = "IconTheme")]
    pub theme: Option<IconTheme>,
    #[serde(rename = "IconSha256")]
    pub sha_256: Option<Sha256>,
}

#[derive(
    Serialize, Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Ord, PartialOrd, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IconFileType {
    Png,
    Jpeg,
    Ico,
}

#[derive(
    Serialize, Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Ord, PartialOrd, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum IconResolution {
    #[serde(rename = "custom")]
    #[strum(serialize = "custom")]
    Custom,
    #[serde(rename = "16x16")]
    #[strum(serialize = "16x16")]
    Size16,
    #[serde(rename = "20x20")]
    #[strum(serialize = "20x20")]
    Size20,
    #[serde(rename = "24x24")]
    #[strum(serialize = "24x24")]
    Size24,
    #[serde(rename = "30x30")]
    #[strum(serialize = "30x30")]
    Size30,
    #[serde(rename = "32x32")]
    #[strum(serialize = "32x32")]
    Size32,
    #[serde(rename = "36x36")]
    #[strum(serialize = "36x36")]
    Size36,
    #[serde(rename = "40x40")]
    #[strum(serialize = "40x40")]
    Size40,
    #[serde(rename = "48x48")]
    #[strum(serialize = "48x48")]
    Size48,
    #[serde(rename = "60x60")]
    #[strum(serialize = "60x60")]
    Size60,
    #[serde(rename = "64x64")]
    #[strum(serialize = "64x64")]
    Size64,
    #[serde(rename = "72x72")]
    #[strum(serialize = "72x72")]
    Size72,
    #[serde(rename = "80x80")]
    #[strum(serialize = "80x80")]
    Size80,
    #[serde(rename = "96x96")]
    #[strum(serialize = "96x96")]
    Size96,
    #[serde(rename = "256x256")]
    #[strum(serialize = "256x256")]
    Size256,
}

#[derive(
    Serialize, Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Ord, PartialOrd, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum IconTheme {
    Default,
    Light,
    Dark,
    HighContrast,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::locale::{IconFileType, IconResolution, IconTheme};

    #[rstest]
    #[case("16x16", IconResolution::Size16)]
    #[case("256X256", IconResolution::Size256)]
    #[case("Custom", IconResolution::Custom)]
    fn icon_resolution(#[case] value: &str, #[case] expected: IconResolution) {
        assert_eq!(value.parse::<IconResolution>(), Ok(expected));
    }

    #[test]
    fn unknown_icon_values() {
        assert!("svg".parse::<IconFileType>().is_err());
        assert!("17x17".parse::<IconResolution>().is_err());
        assert!("sepia".parse::<IconTheme>().is_err());
        assert_eq!("HIGHCONTRAST".parse::<IconTheme>(), Ok(IconTheme::HighContrast));
    }
}
