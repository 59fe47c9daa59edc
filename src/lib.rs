//! Collects source files from a directory and pushes them to the gists API.

pub mod args;
pub mod collect;
pub mod error;
pub mod gist;
pub mod report;

pub use collect::{collect_files, Collection};
pub use error::{Error, Result};
pub use gist::{GistClient, MARKER};
