//! Authentication module
//!
//! dbt Cloud uses a static API token. The `TokenAuthenticator` is built
//! once per source and shared read-only by every stream; it decorates each
//! outgoing request with an `Authorization: Bearer <token>` header.

mod authenticator;

pub use authenticator::{TokenAuthenticator, AUTH_HEADER, AUTH_METHOD};
