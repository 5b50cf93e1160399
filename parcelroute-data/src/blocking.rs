//! Synchronous bridge over an async `reqwest` client.
//!
//! The core traits are synchronous. Each adapter owns a [`BlockingClient`]
//! holding a `reqwest::Client` and a current-thread Tokio runtime that is
//! reused across calls.
//!
//! When called from inside a multi-threaded runtime (detected via
//! [`Handle::try_current`] and [`RuntimeFlavor::MultiThread`]) the caller's
//! handle is used with [`tokio::task::block_in_place`]. Inside a
//! `current_thread` runtime the owned runtime is used instead; that blocks
//! the caller's executor for the duration of the request.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::ProviderBuildError;

pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self { client, runtime })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Keep at most `limit` characters of a response body for error messages.
pub(crate) fn excerpt(body: &str, limit: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(limit) {
        Some((end, _)) => trimmed.get(..end).map_or_else(String::new, |s| format!("{s}…")),
        None => trimmed.to_owned(),
    }
}
