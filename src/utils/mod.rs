pub mod error;

pub use error::{ProbeError, Result};
