pub mod authentication;
pub mod defaults;
pub mod error;
pub mod information;
pub mod negotiation;
pub mod parser;
pub mod schema;
pub mod search;
pub mod traits;

pub use crate::{
    error::{RestError, Result},
    information::Information,
    parser::ManifestJsonParser,
};
