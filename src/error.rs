use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Upstream returned errors: {0}")]
    UpstreamApplicationError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Query template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid page token: {0}")]
    TokenDecodeError(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> ConnectorResult<T>;
    fn with_context<F>(self, f: F) -> ConnectorResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> ConnectorResult<T> {
        self.map_err(|e| ConnectorError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ConnectorResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ConnectorError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> ConnectorResult<T> {
        self.ok_or_else(|| ConnectorError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> ConnectorResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| ConnectorError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! connector_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::ConnectorError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::ConnectorError::$error_type(format!($fmt, $($arg)*))
    };
}
