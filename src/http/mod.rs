//! HTTP transport and response status handling.

mod client;
mod status;

pub use client::{HttpClient, RawResponse, Transport};
pub use status::{check_status, extract_error_message};

#[cfg(test)]
pub use client::MockTransport;
