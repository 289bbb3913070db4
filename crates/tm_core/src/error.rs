use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidArgument(String),
    NotFound(String),
    StateConflict(String),
    InvalidSize(String),
    CorruptLog(String),
    Io(String),
}

impl AppError {
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn state_conflict<M: Into<String>>(message: M) -> Self {
        Self::StateConflict(message.into())
    }

    pub fn invalid_size<M: Into<String>>(message: M) -> Self {
        Self::InvalidSize(message.into())
    }

    pub fn corrupt_log<M: Into<String>>(message: M) -> Self {
        Self::CorruptLog(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::StateConflict(_) => "state_conflict",
            Self::InvalidSize(_) => "invalid_size",
            Self::CorruptLog(_) => "corrupt_log",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message) => message,
            Self::NotFound(message) => message,
            Self::StateConflict(message) => message,
            Self::InvalidSize(message) => message,
            Self::CorruptLog(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
