//! Error types for schema declaration, tokenizing, coercion, and binding.
//!
//! Every position-carrying variant stores a char offset into the raw
//! command line so callers can render a context snippet with
//! [`context`](crate::context).

use thiserror::Error;

/// Errors raised while building a [`Schema`](crate::Schema).
///
/// These are programming errors in the option declaration, fatal at
/// startup and never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Short key is not a single ASCII letter.
    #[error("short key `{0}` is not an ASCII letter")]
    InvalidShortKey(char),
    /// Short key collides with an earlier declaration.
    #[error("short key `{0}` is declared twice")]
    DuplicateShortKey(char),
    /// Long key collides with an earlier declaration.
    #[error("long key `{0}` is declared twice")]
    DuplicateLongKey(String),
    /// Schema name, usage line, or description is blank.
    #[error("schema {0} must not be blank")]
    MissingMetadata(&'static str),
}

/// Errors raised while scanning a raw command line into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A tag prefix was not followed by an ASCII letter, or a tag body
    /// character was neither a letter nor a digit.
    #[error("malformed tag: unexpected `{found}` at offset {position}")]
    MalformedTag { found: char, position: usize },
    /// A quote opened at `position` was never closed.
    #[error("unterminated quote opened at offset {position}")]
    UnterminatedQuote { position: usize },
    /// Only one occurrence per tag is allowed.
    #[error("tag `{key}` appears more than once; only one occurrence per tag is allowed")]
    DuplicateTag { key: String, position: usize },
    /// A `-` at the end of the line with nothing after it.
    #[error("dangling `-` at offset {position}")]
    DanglingDash { position: usize },
}

impl TokenizeError {
    /// Char offset into the raw line this error points at.
    pub fn position(&self) -> usize {
        match self {
            Self::MalformedTag { position, .. }
            | Self::UnterminatedQuote { position }
            | Self::DuplicateTag { position, .. }
            | Self::DanglingDash { position } => *position,
        }
    }
}

/// Errors raised while coercing one raw value to its target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The text is not a valid rendition of the target type.
    #[error("cannot convert `{text}` to {target}")]
    Malformed { text: String, target: &'static str },
    /// The text parses but does not fit the target width.
    #[error("value `{text}` does not fit in {target}")]
    Overflow { text: String, target: &'static str },
    /// The text matches none of an enumeration's accepted names.
    #[error("unknown {target} `{text}`; expected one of: {expected}")]
    UnknownVariant {
        text: String,
        target: &'static str,
        expected: String,
    },
}

/// Errors raised while binding tokens against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The tag matches no declared option (strict mode only).
    #[error("unknown tag `{key}`")]
    UnknownTag { key: String, position: usize },
    /// A flag option was given one or more values.
    #[error("`{key}` is a flag and takes no value")]
    FlagWithValue { key: String, position: usize },
    /// A single-valued option was given no value.
    #[error("`{key}` is missing its value")]
    MissingValue { key: String, position: usize },
    /// A single-valued option was given more than one value.
    #[error("`{key}` takes exactly one value, got {count}")]
    TooManyValues {
        key: String,
        count: usize,
        position: usize,
    },
    /// Short and long forms of one option both appeared on the line.
    #[error("option `{key}` was already matched by an earlier tag")]
    RepeatedOption { key: String, position: usize },
    /// A value could not be coerced to the option's target type.
    #[error("invalid value for `{key}`: {source}")]
    Convert {
        key: String,
        position: usize,
        source: ConvertError,
    },
    /// A required option never appeared on the line.
    #[error("required option {key} was not supplied")]
    MissingRequired { key: String },
}

impl BindError {
    /// Char offset of the originating token, when one exists.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnknownTag { position, .. }
            | Self::FlagWithValue { position, .. }
            | Self::MissingValue { position, .. }
            | Self::TooManyValues { position, .. }
            | Self::RepeatedOption { position, .. }
            | Self::Convert { position, .. } => Some(*position),
            Self::MissingRequired { .. } => None,
        }
    }
}

/// Unified error for a full parse run.
///
/// Convenience wrapper so callers driving schema construction, tokenizing,
/// and binding in one call chain can use a single error type with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

impl ParseError {
    /// Char offset into the raw line, when the underlying error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Schema(_) => None,
            Self::Tokenize(err) => Some(err.position()),
            Self::Bind(err) => err.position(),
        }
    }
}
