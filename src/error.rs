use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("GITHUB_TOKEN environment variable not found")]
    MissingToken,

    /// Non-success response from the gist API, with the response body.
    #[error("gist API returned {status}: {body}")]
    Remote {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Walk(#[from] ignore::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
