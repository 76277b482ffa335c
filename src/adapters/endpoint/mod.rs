//! Integration endpoint adapter
//!
//! Submits the rendered payload to the downstream HR conversion service with
//! a single RPC-style call and reports the service's result fields verbatim.
//! The `EndpointInvoker` trait is the seam the scheduler depends on;
//! `EndpointClient` is the production implementation over HTTPS.

pub mod client;
pub mod soap;

use crate::domain::errors::EndpointError;
use crate::domain::outcome::EndpointResult;
use async_trait::async_trait;

pub use client::EndpointClient;

/// Endpoint invocation seam
#[async_trait]
pub trait EndpointInvoker: Send + Sync {
    /// Submits the rendered payload; returns the endpoint's structured result
    async fn submit(&self, payload: &str) -> Result<EndpointResult, EndpointError>;
}
