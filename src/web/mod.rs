pub mod data;
mod error;
pub mod routes;

pub use error::{Error, Result};
