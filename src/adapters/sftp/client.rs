//! SFTP client implementation
//!
//! libssh2 is blocking, so the whole connect/auth/download sequence runs
//! under `spawn_blocking`; the scheduler's wait is never suspended on a
//! half-finished transfer.

use super::Fetcher;
use crate::config::SftpConfig;
use crate::domain::errors::FetchError;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use ssh2::Session;
use std::fs::File;
use std::net::TcpStream;
use std::path::{Path, PathBuf};

/// Fetches the dated extract over SFTP with password authentication
#[derive(Clone)]
pub struct SftpFetcher {
    config: SftpConfig,
    local_dir: PathBuf,
}

impl SftpFetcher {
    /// Creates a fetcher downloading into `local_dir`
    pub fn new(config: SftpConfig, local_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            local_dir: local_dir.into(),
        }
    }

    /// Blocking fetch: connect, authenticate, existence-check, download.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Unavailable`] when the dated file is not on the server
    /// - [`FetchError::Connection`] / [`FetchError::Authentication`] /
    ///   [`FetchError::Transfer`] for transport problems, with full detail
    /// - [`FetchError::Io`] when the local file cannot be written
    fn fetch_blocking(&self, file_name: &str) -> Result<PathBuf, FetchError> {
        let addr = (self.config.host.as_str(), self.config.port);
        let tcp = TcpStream::connect(addr).map_err(|e| {
            FetchError::Connection(format!(
                "{}:{}: {}",
                self.config.host, self.config.port, e
            ))
        })?;

        let mut session =
            Session::new().map_err(|e| FetchError::Connection(e.to_string()))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| FetchError::Connection(format!("handshake failed: {e}")))?;

        session
            .userauth_password(
                &self.config.username,
                self.config.password.expose_secret().as_ref(),
            )
            .map_err(|e| FetchError::Authentication(e.to_string()))?;

        let sftp = session
            .sftp()
            .map_err(|e| FetchError::Transfer(format!("failed to open sftp channel: {e}")))?;

        let remote = Path::new(&self.config.remote_path).join(file_name);

        // Existence check first: an unpublished file is expected, not an error
        if sftp.stat(&remote).is_err() {
            return Err(FetchError::Unavailable(file_name.to_string()));
        }

        let mut remote_file = sftp.open(&remote).map_err(|e| {
            FetchError::Transfer(format!("failed to open {}: {}", remote.display(), e))
        })?;

        let local = self.local_dir.join(file_name);
        let mut local_file = File::create(&local)?;
        std::io::copy(&mut remote_file, &mut local_file)?;

        tracing::info!(
            file = %file_name,
            local = %local.display(),
            "File downloaded successfully"
        );

        Ok(local)
    }
}

#[async_trait]
impl Fetcher for SftpFetcher {
    async fn fetch(&self, file_name: &str) -> Result<PathBuf, FetchError> {
        let fetcher = self.clone();
        let name = file_name.to_string();

        tokio::task::spawn_blocking(move || fetcher.fetch_blocking(&name))
            .await
            .map_err(|e| FetchError::Transfer(format!("fetch task failed: {e}")))?
    }
}
