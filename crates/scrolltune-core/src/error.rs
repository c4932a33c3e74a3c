use thiserror::Error;

/// Problems with the shape of a settings snapshot.
///
/// These surface where the raw snapshot is first interpreted, never from inside
/// the curve math.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing setting `{key}`")]
    MissingKey { key: String },

    #[error("setting `{key}` should be {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("setting `{key}` has unsupported value `{value}`")]
    InvalidValue { key: String, value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
