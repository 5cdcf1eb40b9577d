use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read TOML: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("Could not write TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("{} is a directory", .0.display())]
    IsDirectory(PathBuf),

    #[error("{} is read only", .0.display())]
    ReadOnly(PathBuf),

    #[error("{0} can not be exported to another image format")]
    UnsupportedFormat(String),

    #[error("No more to undo")]
    NoHistory,
}

impl Error {
    /// Wraps an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
