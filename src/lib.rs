pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::config::CaptureConfig;
pub use crate::core::session::capture;
pub use crate::core::transcript::parse_transcript;
pub use crate::utils::{ProbeError, Result};
