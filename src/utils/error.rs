use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Failed to parse transcript: {message}\nCaptured transcript was:\n{transcript:?}")]
    Parse { message: String, transcript: String },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProbeError {
    pub fn session<S: Into<String>>(msg: S) -> Self {
        ProbeError::Session(msg.into())
    }

    pub fn parse<S: Into<String>, T: Into<String>>(msg: S, transcript: T) -> Self {
        ProbeError::Parse {
            message: msg.into(),
            transcript: transcript.into(),
        }
    }

    pub fn invalid_args<S: Into<String>>(msg: S) -> Self {
        ProbeError::InvalidArgs(msg.into())
    }

    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        ProbeError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let err = ProbeError::session("shell did not respond");
        assert_eq!(err.to_string(), "Session error: shell did not respond");
    }

    #[test]
    fn test_parse_error_carries_transcript() {
        let err = ProbeError::parse("continuation token not found", "garbled output");
        let message = err.to_string();
        assert!(message.contains("continuation token not found"));
        assert!(message.contains("garbled output"));
    }

    #[test]
    fn test_invalid_args_display() {
        let err = ProbeError::invalid_args("--env expects KEY=VALUE");
        assert_eq!(err.to_string(), "Invalid arguments: --env expects KEY=VALUE");
    }
}
