//! SFTP fetch adapter
//!
//! Obtains the dated extract file from the remote server into local storage.
//! The `Fetcher` trait is the seam the scheduler depends on; `SftpFetcher`
//! is the production implementation over libssh2.

pub mod client;

use crate::domain::errors::FetchError;
use async_trait::async_trait;
use std::path::PathBuf;

pub use client::SftpFetcher;

/// Remote fetch seam
///
/// A fetcher either produces the local path of a readable downloaded file or
/// a [`FetchError`] describing why it could not. The "file not published yet"
/// condition is `FetchError::Unavailable` and is not an escalation-worthy
/// failure.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the named dated file from the remote server
    async fn fetch(&self, file_name: &str) -> Result<PathBuf, FetchError>;
}
