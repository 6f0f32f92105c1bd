//! Authentication module
//!
//! Supports: pre-issued tokens and identity v3 password authentication.
//!
//! The `Authenticator` caches the issued token together with its service
//! catalog and transparently re-authenticates once the token expires.

mod authenticator;
mod types;

pub use authenticator::{
    Authenticator, StaticToken, TokenSource, AUTH_TOKEN_HEADER, SUBJECT_TOKEN_HEADER,
};
pub use types::{
    AuthConfig, CachedToken, Catalog, CatalogEntry, Endpoint, EndpointOpts, PasswordAuth,
};
