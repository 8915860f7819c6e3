//! HTTP plumbing: transport seam, response headers and classification.

mod classify;
mod headers;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use classify::{Classification, classify};
pub use headers::Headers;
pub use transport::{CONNECT_TIMEOUT, HttpTransport, PostRequest, RawResponse, Transport};
