use std::fmt::{self, Display};

use thiserror::Error;

pub mod commands {
    pub mod custom;
    pub mod dyes;
    pub mod favorites;
    pub mod history;
    pub mod open;
    pub mod patterns;
    pub mod ratio;
    pub mod share;
    pub mod suggest;
}

pub mod catalog;
pub mod color_input;
pub mod context;
pub mod filter;
pub mod ids;
mod lz_string;
mod output;
pub mod share;
pub mod storage;
pub mod telemetry;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    Harmony(#[from] colorant_harmony::Error),
    #[error("{code} (key `{key}`)")]
    Storage { code: StorageErrorCode, key: String },
    #[error("Unknown dye `{0}`")]
    UnknownDye(String),
    #[error("Invalid share link: {0}")]
    InvalidShare(String),
    #[error("Invalid custom color: {0}")]
    InvalidCustomColor(String),
    #[error("{0}")]
    General(String),
}

impl Error {
    pub(crate) fn storage(code: StorageErrorCode, key: &str) -> Self {
        Error::Storage {
            code,
            key: key.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    QuotaExceeded,
    ParseError,
    SaveError,
    LoadError,
}

impl Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            StorageErrorCode::QuotaExceeded => "Storage is full. Delete some old entries",
            StorageErrorCode::ParseError => "Stored data could not be read",
            StorageErrorCode::SaveError => "Failed to save data",
            StorageErrorCode::LoadError => "Failed to load data",
        };

        f.write_str(message)
    }
}
