use std::fmt;
use thiserror::Error as ThisError;

///
/// EngineError
///
/// Structured runtime error with a stable internal classification.
/// Callers branch on `class`/`detail`, render `message`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct EngineError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl EngineError {
    /// Construct an EngineError with no structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct an unknown-collection error.
    pub fn resource_not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Store,
            message: format!("resource '{resource}' not found"),
            detail: Some(ErrorDetail::Store(StoreError::ResourceNotFound {
                resource,
            })),
        }
    }

    /// Construct an unknown-record error within a known collection.
    pub fn record_not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        let resource = resource.into();
        let id = id.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Store,
            message: format!("record '{id}' not found in resource '{resource}'"),
            detail: Some(ErrorDetail::Store(StoreError::RecordNotFound {
                resource,
                id,
            })),
        }
    }

    /// Construct an unknown-aggregate-function error.
    pub fn unsupported_aggregate(name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Aggregate,
            message: format!("unsupported aggregate function: {name}"),
            detail: Some(ErrorDetail::Store(StoreError::UnsupportedAggregate { name })),
        }
    }

    /// Construct a declared-shape violation for one record field.
    pub fn schema_violation(
        resource: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let resource = resource.into();
        let field = field.into();
        let message = message.into();

        Self {
            class: ErrorClass::SchemaViolation,
            origin: ErrorOrigin::Store,
            message: format!("{resource}.{field}: {message}"),
            detail: Some(ErrorDetail::Store(StoreError::SchemaViolation {
                resource,
                field,
                message,
            })),
        }
    }

    /// Construct a store-origin internal error.
    pub(crate) fn store_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Store, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`EngineError`].
/// This enum is intentionally extensible.
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Store(StoreError),
}

///
/// StoreError
///
/// Store-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Store`].
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("resource not found: {resource}")]
    ResourceNotFound { resource: String },

    #[error("record not found: {resource}/{id}")]
    RecordNotFound { resource: String, id: String },

    #[error("unsupported aggregate: {name}")]
    UnsupportedAggregate { name: String },

    #[error("schema violation on {resource}.{field}: {message}")]
    SchemaViolation {
        resource: String,
        field: String,
        message: String,
    },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Unsupported,
    SchemaViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
            Self::SchemaViolation => "schema_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Store,
    Query,
    Aggregate,
    Runtime,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Store => "store",
            Self::Query => "query",
            Self::Aggregate => "aggregate",
            Self::Runtime => "runtime",
        };
        write!(f, "{label}")
    }
}
