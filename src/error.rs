use std::fmt::{self, Display, Formatter};

/// What went wrong, independent of where. Drives the HTTP status of a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unknown,
    Network,
    Encoding,
    NotFound,
    Invalid,
}

#[derive(Debug)]
pub enum Error {
    Network(String),
    Encoding(String),
    NotFound(String),
    Invalid(String),
    Unknown(String),
    /// A stage label wrapped around the failure that stopped it.
    Context(&'static str, Box<Error>),
}

impl Error {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    #[must_use]
    pub fn context(self, label: &'static str) -> Self {
        Self::Context(label, Box::new(self))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Invalid(_) => ErrorKind::Invalid,
            Self::Unknown(_) => ErrorKind::Unknown,
            Self::Context(_, inner) => inner.kind(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Unknown(e.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Encoding(msg) => write!(f, "encoding error: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid request: {msg}"),
            Self::Unknown(msg) => write!(f, "unknown error: {msg}"),
            Self::Context(label, inner) => write!(f, "{label} error: {inner}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Labels the stage a failure came from, e.g. `.context("board list")?`.
pub trait Context<T> {
    fn context(self, label: &'static str) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context(self, label: &'static str) -> Result<T> {
        self.map_err(|e| e.context(label))
    }
}
