use std::fmt;

/// Broad classification of interpreter failures. Arithmetic that goes wrong
/// is not an error at all; it degrades to the NaN value (see `value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed invocation; nothing was parsed or run.
    Usage,
    /// The program text was rejected; nothing was run.
    Syntax,
    /// The machine hit an unrecoverable condition mid-run.
    Fault,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Usage => "USAGE",
            ErrorCode::Syntax => "SYNTAX",
            ErrorCode::Fault => "FAULT",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub struct ChickenError {
    pub message: String,
    pub code: ErrorCode,
}

impl ChickenError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode::Usage,
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode::Syntax,
        }
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode::Fault,
        }
    }

    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Syntax
    }
}

impl fmt::Display for ChickenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ChickenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_are_parse_errors() {
        assert!(ChickenError::syntax("bad token").is_parse());
        assert!(!ChickenError::fault("bad index").is_parse());
    }

    #[test]
    fn display_is_the_message() {
        let err = ChickenError::fault("pop from an empty store");
        assert_eq!(err.to_string(), "pop from an empty store");
        assert_eq!(ErrorCode::Fault.to_string(), "FAULT");
    }
}
