use thiserror::Error;

/// Failures surfaced by the simulation core.
///
/// Every mutation in the core is total over a validated config, so the
/// observable failures are an unknown issuer code and a config rejected at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unknown issuer '{code}'.")]
    NotFound { code: String },
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl CoreError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_usage_exit_code() {
        let err: AppError = CoreError::not_found("MSFT").into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("MSFT"));
    }

    #[test]
    fn invalid_config_maps_to_usage_exit_code() {
        let err: AppError = CoreError::invalid_config("event_capacity must be > 0.").into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid config: event_capacity must be > 0.");
    }
}
