// --- File: crates/reservas_auth/src/lib.rs ---
pub mod authenticator;
#[cfg(test)]
mod authenticator_test;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod oauth;
pub mod routes;
pub mod session;

pub use authenticator::{AuthSettings, AuthorizedUser, Authenticator};
pub use error::AuthError;
pub use oauth::{GoogleOAuthClient, LoginRedirect, TokenGrant, TokenProvider, UserIdentity};
pub use routes::routes;
