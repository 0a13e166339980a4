use thiserror::Error;

/// Top-level error type for the geokern geometry kernel.
#[derive(Debug, Error)]
pub enum GeokernError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Wkt(#[from] WktError),
}

/// Errors raised while building or relating geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The inputs cannot form a valid object at the requested precision.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A projection is undefined because its direction lies in the target plane.
    #[error("ambiguous projection: {0}")]
    AmbiguousProjection(String),

    /// The relation is not defined for this pair of geometry kinds.
    #[error("relation `{relation}` is not supported between {lhs} and {rhs}")]
    UnsupportedRelation {
        relation: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("precision of {0} digits exceeds the supported maximum of 9")]
    InvalidPrecision(u32),
}

/// Errors raised by the WKT text codec.
#[derive(Debug, Error)]
pub enum WktError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("expected {expected} at offset {offset}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("unknown geometry tag `{0}`")]
    UnknownTag(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("expected {expected} coordinates per point, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`GeokernError`].
pub type Result<T> = std::result::Result<T, GeokernError>;

impl GeometryError {
    /// Shorthand for a [`GeometryError::DegenerateInput`] wrapped as [`GeokernError`].
    pub(crate) fn degenerate(msg: impl Into<String>) -> GeokernError {
        Self::DegenerateInput(msg.into()).into()
    }
}
