// src/error.rs

use std::fmt;

use validator::ValidationErrorsKind;

/// Fallback shown when neither the server nor the client produced a usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Global Application Error Enum.
/// Every failure in the console degrades to one of these and, eventually, to a toast.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    // Client-side check failed; nothing was sent
    Validation(String),

    // Server answered with success=false or a non-2xx status
    Api { status: Option<u16>, message: String },

    // Transport failure (connection refused, DNS, ...)
    Network(String),

    // Body did not match the expected envelope
    Decode { status: Option<u16>, message: String },

    // Missing or malformed configuration
    Config(String),

    // Local filesystem failure (exports)
    Io(String),

    // Same keyed request already outstanding
    Busy(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "validation failed: {msg}"),
            AppError::Api { status: Some(code), message } => {
                write!(f, "request failed ({code}): {message}")
            }
            AppError::Api { status: None, message } => write!(f, "request failed: {message}"),
            AppError::Network(msg) => write!(f, "network error: {msg}"),
            AppError::Decode { message, .. } => write!(f, "unexpected response: {message}"),
            AppError::Config(msg) => write!(f, "configuration error: {msg}"),
            AppError::Io(msg) => write!(f, "io error: {msg}"),
            AppError::Busy(key) => write!(f, "request already in progress: {key}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status attached to the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } | AppError::Decode { status, .. } => *status,
            _ => None,
        }
    }

    /// Text for the error toast.
    ///
    /// Server messages and validation messages are shown verbatim; transport and
    /// decoding failures fall back to the generic string.
    pub fn toast_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Config(msg) => msg.clone(),
            AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Busy(_) => "Please wait for the current request to finish.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Converts `reqwest::Error` into `AppError`.
/// Status errors keep their code; everything else is a transport failure.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        if err.is_decode() {
            AppError::Decode {
                status,
                message: err.to_string(),
            }
        } else if let Some(code) = status {
            AppError::Api {
                status: Some(code),
                message: String::new(),
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode {
            status: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("invalid url: {err}"))
    }
}

/// Flattens validator output (nested structs and lists included) into a single toast-friendly line.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        messages.sort();
        messages.dedup();
        AppError::Validation(messages.join("; "))
    }
}

fn collect_messages(errors: &validator::ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None if e.code == "required" => format!("{field} is required"),
                    None => format!("{field} is invalid"),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_messages(inner, out);
                }
            }
        }
    }
}
