use thiserror::Error;

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// handling, log filtering and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidConfig,

    // Data availability
    NotFound,
    InvalidSnapshot,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,

    // Operator
    InputClosed,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::InputClosed => "ERR_INPUT_CLOSED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity key context (`modid:id`)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity key context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised by the diff and correlation stages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// A snapshot or missing-element file is absent
    #[error("Required file not found: {path}")]
    SnapshotUnavailable { path: String },

    /// A snapshot or missing-element file could not be parsed
    #[error("Invalid snapshot data in {path}: {reason}")]
    InvalidSnapshot { path: String, reason: String },

    /// Category name is not one of blocks/items/entities
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// Configuration file or override is invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Checkpoint or final artifact could not be written
    #[error("Failed to persist {path}: {reason}")]
    Persistence { path: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Underlying IO failure outside persistence (operator terminal)
    #[error("IO error during {op}: {message}")]
    Io { op: String, message: String },

    /// Standard input reached end-of-file while a decision was pending
    #[error("Operator input closed")]
    OperatorInputClosed,
}

impl From<BridgeError> for ExError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::SnapshotUnavailable { path } => ExError::new(ExErrorKind::NotFound)
                .with_path(path)
                .with_message("Required file not found"),

            BridgeError::InvalidSnapshot { path, reason } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_path(path)
                    .with_message(reason)
            }

            BridgeError::UnknownCategory { name } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Unknown category '{}'", name)),

            BridgeError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            BridgeError::Persistence { path, reason } => ExError::new(ExErrorKind::Persistence)
                .with_path(path)
                .with_message(reason),

            BridgeError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            BridgeError::Io { op, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_message(message),

            BridgeError::OperatorInputClosed => ExError::new(ExErrorKind::InputClosed)
                .with_message("Operator input closed"),
        }
    }
}

/// Conversion from serde_json::Error to BridgeError
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization {
            message: err.to_string(),
        }
    }
}
