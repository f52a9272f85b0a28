use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QingCloudError {
    /// A field table declared a field whose Rust type the binder cannot map.
    UnsupportedFieldType {
        field: String,
        kind: String,
    },
    ValidationFailure {
        field: String,
        message: String,
    },
    /// Network failure, timeout or a non-success HTTP status.
    TransportFailure {
        context: String,
        reason: String,
    },
    ConfigurationMissing {
        key: String,
    },
    InvalidConfiguration {
        context: String,
        reason: String,
    },
    /// Key rejected by the MAC. Unreachable with HMAC, which takes keys of
    /// any length.
    Signing {
        reason: String,
    },
}

impl fmt::Display for QingCloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QingCloudError::UnsupportedFieldType { field, kind } => {
                write!(f, "Unsupported field type, name: {field}, type: {kind}")
            }
            QingCloudError::ValidationFailure { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            QingCloudError::TransportFailure { context, reason } => {
                write!(f, "Transport error in {context}: {reason}")
            }
            QingCloudError::ConfigurationMissing { key } => {
                write!(
                    f,
                    "Missing configuration value '{key}' (set it in the config file or environment)"
                )
            }
            QingCloudError::InvalidConfiguration { context, reason } => {
                write!(f, "Invalid configuration in {context}: {reason}")
            }
            QingCloudError::Signing { reason } => write!(f, "Failed to sign request: {reason}"),
        }
    }
}

impl std::error::Error for QingCloudError {}

impl QingCloudError {
    /// Errors caused by what the user supplied, as opposed to the network.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QingCloudError::UnsupportedFieldType { .. }
                | QingCloudError::ValidationFailure { .. }
                | QingCloudError::ConfigurationMissing { .. }
                | QingCloudError::InvalidConfiguration { .. }
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, QingCloudError::TransportFailure { .. })
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        QingCloudError::ValidationFailure {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn from_io_error(e: std::io::Error, context: &str) -> Self {
        QingCloudError::InvalidConfiguration {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_parse_error(e: impl std::fmt::Display, context: &str) -> Self {
        QingCloudError::InvalidConfiguration {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_transport_error(e: impl std::fmt::Display, context: &str) -> Self {
        QingCloudError::TransportFailure {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }
}
