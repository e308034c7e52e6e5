use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are deliberately collapsed into `InvalidToken`
/// so callers cannot tell expiry, tampering and algorithm mismatch apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}
