use thiserror::Error;

use crate::membership::Shape;

/// Errors produced while building or running a fuzzy system.
///
/// None of these are fatal: the caller decides whether to report and carry on.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("variable '{0}' already exists")]
    DuplicateName(String),

    #[error("variable '{0}' not found")]
    VariableNotFound(String),

    #[error("fuzzy set '{set}' not found on variable '{variable}'")]
    SetNotFound { variable: String, set: String },

    #[error("invalid operator '{0}', expected one of: and, or, and_not")]
    InvalidOperator(String),

    #[error("invalid membership shape '{0}', expected TRI or TRAP")]
    InvalidShape(String),

    #[error("invalid variable type '{0}', expected IN or OUT")]
    InvalidVariableKind(String),

    #[error("invalid rule format, expected 7 tokens (IN_variable set operator IN_variable set OUT_variable set), got {0}")]
    InvalidRuleFormat(usize),

    #[error("{shape} membership takes {expected} values, got {found}")]
    InvalidParamCount {
        shape: Shape,
        expected: usize,
        found: usize,
    },

    #[error("membership breakpoints must be finite and non-decreasing, got {params:?}")]
    DegenerateMembershipParams { params: Vec<f64> },

    #[error("no output variable defined")]
    NoOutputVariable,

    #[error("total degree is zero, unable to calculate the overall centroid")]
    ZeroTotalDegree,
}

impl FuzzyError {
    /// Whether this error just means a run produced no crisp result.
    pub fn is_no_output(&self) -> bool {
        matches!(self, Self::NoOutputVariable | Self::ZeroTotalDegree)
    }
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

#[test]
fn test_no_output_classification() {
    assert!(FuzzyError::NoOutputVariable.is_no_output());
    assert!(FuzzyError::ZeroTotalDegree.is_no_output());
    assert!(!FuzzyError::VariableNotFound("x".into()).is_no_output());
    assert_eq!(
        FuzzyError::SetNotFound {
            variable: "risk".into(),
            set: "high".into(),
        }
        .to_string(),
        "fuzzy set 'high' not found on variable 'risk'"
    );
}
