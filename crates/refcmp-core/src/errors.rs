use refcmp_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using CompareError
pub type Result<T> = std::result::Result<T, CompareError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Mismatches between compared values are never errors; they are reported
/// as [`crate::compare::Difference`]s. The kinds below cover the cases that
/// must abort a comparison instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Engine configuration
    /// No strategy in the comparator chain claimed a pair of values
    Uncomparable,
    /// The comparator chain is empty or otherwise unusable
    InvalidChain,

    // Input
    /// A property path could not be resolved against a value
    PropertyNotFound,

    // Collaborators
    /// An expected or actual row source failed to produce rows
    RowSource,

    // Settings
    InvalidSettings,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Uncomparable => "ERR_UNCOMPARABLE",
            ExErrorKind::InvalidChain => "ERR_INVALID_CHAIN",
            ExErrorKind::PropertyNotFound => "ERR_PROPERTY_NOT_FOUND",
            ExErrorKind::RowSource => "ERR_ROW_SOURCE",
            ExErrorKind::InvalidSettings => "ERR_INVALID_SETTINGS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable classification plus the context needed to locate the
/// failure: the operation, the comparison path and the table involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    table: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            table: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the comparison path at which the failure occurred
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the qualified table name involved in the failure
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for refcmp operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// No comparator in the chain claimed the pair
    #[error("No comparator can handle {left_type} vs {right_type} at '{path}'")]
    Uncomparable {
        left_type: String,
        right_type: String,
        path: String,
    },

    /// A comparator chain was built without any strategies
    #[error("Comparator chain has no strategies")]
    EmptyChain,

    /// Property path segment did not resolve
    #[error("Property '{property}' not found (failed at '{segment}')")]
    PropertyNotFound { property: String, segment: String },

    /// An expected or actual row source failed
    #[error("Row source failed for table {table}: {message}")]
    RowSource { table: String, message: String },

    /// Settings could not be parsed or are inconsistent
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::Uncomparable {
                left_type,
                right_type,
                path,
            } => ExError::new(ExErrorKind::Uncomparable)
                .with_path(path)
                .with_message(format!(
                    "no comparator can handle {} vs {}",
                    left_type, right_type
                )),

            CompareError::EmptyChain => ExError::new(ExErrorKind::InvalidChain)
                .with_message("comparator chain has no strategies"),

            CompareError::PropertyNotFound { property, segment } => {
                ExError::new(ExErrorKind::PropertyNotFound)
                    .with_path(property)
                    .with_message(format!("property segment '{}' not found", segment))
            }

            CompareError::RowSource { table, message } => {
                ExError::new(ExErrorKind::RowSource)
                    .with_table(table)
                    .with_message(message)
            }

            CompareError::InvalidSettings { message } => {
                ExError::new(ExErrorKind::InvalidSettings).with_message(message)
            }

            CompareError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<std::io::Error> for CompareError {
    fn from(err: std::io::Error) -> Self {
        CompareError::Io {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CompareError {
    fn from(err: toml::de::Error) -> Self {
        CompareError::InvalidSettings {
            message: err.to_string(),
        }
    }
}
