use std::fmt;

#[derive(Debug)]
pub enum Error {
    ConfigParse(String),
    ConfigWrite(String),
    IoError(std::io::Error),
    BlockNotFound(String),
    DuplicateBlockType(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigParse(msg) => write!(f, "Configuration parse error: {}", msg),
            Error::ConfigWrite(msg) => write!(f, "Configuration write error: {}", msg),
            Error::IoError(err) => write!(f, "IO error: {}", err),
            Error::BlockNotFound(id) => write!(f, "No block with id '{}' on this page", id),
            Error::DuplicateBlockType(tag) => {
                write!(f, "Block type '{}' is already registered", tag)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWrite(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
