use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` contains non-hex digits")]
    InvalidDigits(String),
    #[error("color must have 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GravityError {
    #[error("unknown gravity name `{0}`")]
    UnknownName(String),
}

/// Failure to interpret a construction-time attribute.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttrError {
    #[error("attribute `{key}`: `{value}` is not a number")]
    InvalidNumber { key: String, value: String },
    #[error("attribute `{key}`: `{value}` is not a dimension (expected e.g. `12dp` or `24px`)")]
    InvalidDimension { key: String, value: String },
    #[error("attribute `{key}`: {source}")]
    InvalidColor {
        key: String,
        #[source]
        source: ColorError,
    },
    #[error("attribute `{key}`: unknown orientation `{value}`")]
    UnknownOrientation { key: String, value: String },
    #[error("attribute `{key}`: `{value}`: {source}")]
    UnknownGravity {
        key: String,
        value: String,
        #[source]
        source: GravityError,
    },
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine failure: {0}")]
    Taffy(taffy::TaffyError),
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(e: taffy::TaffyError) -> Self {
        LayoutError::Taffy(e)
    }
}
