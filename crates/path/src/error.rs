use thiserror::Error;

/// Reasons why a sample sequence is rejected by [`try_points`](crate::try_points).
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Insufficient data: need at least {required} samples, got {actual}.")]
    InsufficientData { required: usize, actual: usize },
    #[error("Sample {index} has a non-finite coordinate.")]
    NonFinite { index: usize },
    #[error("Sample {index} does not have a strictly increasing x coordinate.")]
    NotIncreasing { index: usize },
}
