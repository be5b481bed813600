use std::fmt;

/// Application-specific error types.
///
/// Each variant names the stage of the relay that failed and carries the
/// underlying cause as text for logging.
#[derive(Debug)]
pub enum AppError {
    /// Writing the lead record to the key-value store failed.
    StorageWriteFailed(String),
    /// Submitting the lead email to the provider failed.
    EmailSendFailed(String),
    /// Posting the status message to the chat channel failed.
    ChatPostFailed(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageWriteFailed(msg) => write!(f, "Storage write failed: {}", msg),
            AppError::EmailSendFailed(msg) => write!(f, "Email send failed: {}", msg),
            AppError::ChatPostFailed(msg) => write!(f, "Chat post failed: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prefixes_message() {
        let result: Result<(), AppError> =
            Err(AppError::EmailSendFailed("timeout".to_string()));
        let err = result.context("emailing lead").unwrap_err();
        assert_eq!(err.to_string(), "emailing lead: Email send failed: timeout");
    }

    #[test]
    fn test_storage_message() {
        let err = AppError::StorageWriteFailed("throttled".to_string());
        assert_eq!(err.to_string(), "Storage write failed: throttled");
    }
}
