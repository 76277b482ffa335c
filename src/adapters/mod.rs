//! External integrations
//!
//! Each collaborator of the pipeline lives behind a small trait so the
//! scheduler can be exercised without a network:
//!
//! - [`sftp`] - remote fetch of the dated extract ([`sftp::Fetcher`])
//! - [`endpoint`] - submission to the HR conversion service
//!   ([`endpoint::EndpointInvoker`])
//! - [`mail`] - operator notifications ([`mail::Notifier`])

pub mod endpoint;
pub mod mail;
pub mod sftp;
