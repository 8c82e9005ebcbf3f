//! HTTP capability used by the fetch engine, with a reqwest adapter.

mod client;

pub use client::{DEFAULT_TIMEOUT, HttpClient, HttpResponse, ReqwestHttpClient};

#[cfg(test)]
pub use client::MockHttpClient;
