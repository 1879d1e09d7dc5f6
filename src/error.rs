use std::path::PathBuf;

use thiserror::Error;

/// Every failure the pipeline can hit. All of them end the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no servers configured in {}", .0.display())]
    EmptyInput(PathBuf),
    #[error("could not retrieve statistics from {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("could not write {dest}: {source}")]
    IoWrite {
        dest: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn network(url: &str, reason: impl ToString) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
