use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use derive_more::{AsRef, Deref};
use serde_with::SerializeDisplay;
use thiserror::Error;

const SHA256_DIGEST_LEN: usize = 256 / u8::BITS as usize;

// 256 bits / 4 bits per hex character
const SHA256_HEX_LEN: usize = SHA256_DIGEST_LEN * 2;

/// A SHA-256 digest decoded from its hexadecimal wire form.
#[derive(
    AsRef, Clone, Copy, Debug, Default, Deref, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay,
)]
pub struct Sha256([u8; SHA256_DIGEST_LEN]);

#[derive(Error, Debug, Eq, PartialEq)]
pub enum Sha256Error {
    #[error("SHA256 must be {SHA256_HEX_LEN} hexadecimal characters but was {0}")]
    InvalidLength(usize),
    #[error("SHA256 contained a non-hexadecimal character")]
    InvalidCharacter,
}

impl Sha256 {
    pub fn from_hex(hex: &str) -> Result<Self, Sha256Error> {
        if hex.len() != SHA256_HEX_LEN {
            return Err(Sha256Error::InvalidLength(hex.len()));
        }

        let mut digest = [0; SHA256_DIGEST_LEN];
        base16ct::mixed::decode(hex, &mut digest).map_err(|_| Sha256Error::InvalidCharacter)?;
        Ok(Self(digest))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SHA256_DIGEST_LEN] {
        &self.0
    }
}

impl Display for Sha256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&base16ct::upper::encode_string(&self.0))
    }
}

impl FromStr for Sha256 {
    type Err = Sha256Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
