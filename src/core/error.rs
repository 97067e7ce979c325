//! Failure kinds reported by session operations.
//!
//! Every variant is recoverable.  The `Display` text doubles as the
//! `reason` field of the response envelope, so keep it short and lowercase.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("couldn't open dialog")]
    DialogError,

    #[error("invalid path")]
    InvalidPath,

    #[error("no root folder")]
    NoRootFolder,

    #[error("couldn't list folder: {0}")]
    ListingError(#[source] io::Error),

    #[error("no sub folders")]
    EmptyFolder,

    #[error("no subdirectories found")]
    NoSubdirectoriesFound,

    #[error("couldn't generate random value")]
    RandomSourceError,

    #[error("no winner")]
    NoWinner,

    #[error("error when opening the path: {0}")]
    OpenFailed(#[source] io::Error),
}
