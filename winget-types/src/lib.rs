pub mod installer;
pub mod locale;
mod manifest;
pub mod shared;

pub use manifest::Manifest;
