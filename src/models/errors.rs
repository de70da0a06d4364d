//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so it can be traced in logs
//! and mapped to an HTTP status at the API boundary.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - INPUT_xxx: caller-facing validation errors
//! - CFG_xxx: Configuration / reference data errors
//! - API_xxx: API errors
//!
//! Missing evidence is NOT an error: the scoring engine models it as a
//! zero-confidence sub-score.

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Offending input field, for `InvalidArgument`
    pub field: Option<String>,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// True for errors that mean the engine cannot run at all
    pub fn is_configuration_error(&self) -> bool {
        self.code.is_configuration()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] {} (field: {})", self.code.as_str(), self.message, field),
            None => write!(f, "[{}] {}", self.code.as_str(), self.message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Input Errors (1xx)
    // ============================================
    /// Missing or empty required argument
    InvalidArgument,

    // ============================================
    // Configuration Errors (2xx)
    // ============================================
    /// Reference database could not be loaded
    ConfigMissingReferenceData,
    /// Suspicious pattern failed to compile
    ConfigInvalidPattern,
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Unauthorized (invalid API key)
    ApiUnauthorized,
    /// Rate limit exceeded
    ApiRateLimited,
    /// Internal server error
    ApiInternalError,
    /// Resource not found
    ApiNotFound,

    // ============================================
    // Generic Errors (9xx)
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INPUT_INVALID_ARGUMENT",

            Self::ConfigMissingReferenceData => "CFG_MISSING_REFERENCE_DATA",
            Self::ConfigInvalidPattern => "CFG_INVALID_PATTERN",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiUnauthorized => "API_UNAUTHORIZED",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ApiNotFound => "API_NOT_FOUND",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidArgument | Self::ApiBadRequest => 400,
            Self::ApiUnauthorized => 401,
            Self::ApiNotFound => 404,
            Self::ApiRateLimited => 429,
            _ => 500,
        }
    }

    /// Configuration errors are fatal to the calling context
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissingReferenceData | Self::ConfigInvalidPattern | Self::ConfigInvalidValue
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Missing or empty argument, naming the offending field
    pub fn invalid_argument(field: &str) -> Self {
        Self {
            code: ErrorCode::InvalidArgument,
            message: format!("{} is required", field),
            field: Some(field.to_string()),
            source: None,
        }
    }

    /// Suspicious pattern did not compile
    pub fn invalid_pattern(pattern: &str, err: fancy_regex::Error) -> Self {
        Self::with_source(
            ErrorCode::ConfigInvalidPattern,
            format!("Invalid suspicious pattern: {}", pattern),
            err,
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::ConfigMissingReferenceData, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ConfigMissingReferenceData, "JSON parse error", err)
    }
}

impl From<fancy_regex::Error> for AppError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::with_source(ErrorCode::ConfigInvalidPattern, "Regex compile error", err)
    }
}
