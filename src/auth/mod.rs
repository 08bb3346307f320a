//! Authentication module
//!
//! Supports: access token, Bearer token, HTTP Basic
//!
//! The `Authenticator` applies the configured credentials to every
//! outgoing request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
