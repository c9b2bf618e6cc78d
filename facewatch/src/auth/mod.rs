//! Authentication for the management API.
//!
//! Three pieces cooperate on every authenticated request:
//!
//! - [`password`]: Argon2id hashing for user and camera credentials
//! - [`session`]: stateless JWT bearer tokens with an expiry claim
//! - [`current_user`]: the axum extractor that verifies the token signature,
//!   requires a live row in the session ledger (revocation point), and loads
//!   the acting user
//!
//! A token is only honored while its ledger row exists and is unexpired, so
//! logout and ledger purges take effect immediately even though the JWT
//! itself is stateless.

pub mod current_user;
pub mod password;
pub mod session;
