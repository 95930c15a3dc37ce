use thiserror::Error;

pub const ERR_PARSE: &str = "PARSE_ERROR";
pub const ERR_UNSUPPORTED_SHAPE: &str = "UNSUPPORTED_SHAPE";
pub const ERR_AMBIGUOUS_MOUNT: &str = "AMBIGUOUS_MOUNT";
pub const ERR_INVALID_OPTIONS: &str = "INVALID_OPTIONS";

pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Everything that can stop a snippet from becoming an application.
///
/// Resolver/assembler inconsistencies are not represented here: those are
/// defects and panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The input is not valid JSX-flavoured source.
    #[error("failed to parse snippet at {line}:{column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// No top-level statement matches a supported snippet shape.
    #[error("unsupported snippet: {reason}")]
    Classification { reason: String },

    /// More than one top-level statement mounts a tree into the DOM.
    #[error("found {count} top-level mount calls, expected at most one")]
    AmbiguousMountCapability { count: usize },

    #[error("invalid synthesis options: {0}")]
    InvalidOptions(String),
}

impl SynthesisError {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        SynthesisError::Classification {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, shared with the Node binding.
    pub fn code(&self) -> &'static str {
        match self {
            SynthesisError::Parse { .. } => ERR_PARSE,
            SynthesisError::Classification { .. } => ERR_UNSUPPORTED_SHAPE,
            SynthesisError::AmbiguousMountCapability { .. } => ERR_AMBIGUOUS_MOUNT,
            SynthesisError::InvalidOptions(_) => ERR_INVALID_OPTIONS,
        }
    }
}

/// Convert a byte offset into a 1-based line/column pair.
pub fn line_column(source: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() as u32 + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() as u32 + 1,
        None => before.chars().count() as u32 + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column() {
        let source = "const a = 1;\nconst b = ;\n";
        assert_eq!(line_column(source, 0), (1, 1));
        assert_eq!(line_column(source, 13), (2, 1));
        assert_eq!(line_column(source, 23), (2, 11));
        assert_eq!(line_column(source, 1000), (3, 1));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SynthesisError::unsupported("empty input").code(),
            "UNSUPPORTED_SHAPE"
        );
        assert_eq!(
            SynthesisError::AmbiguousMountCapability { count: 2 }.code(),
            "AMBIGUOUS_MOUNT"
        );
        assert_eq!(
            SynthesisError::AmbiguousMountCapability { count: 2 }.to_string(),
            "found 2 top-level mount calls, expected at most one"
        );
    }
}
