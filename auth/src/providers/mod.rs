//! Provider traits for authentication collaborators.
//!
//! Implementations live in [`crate::stores`].

pub mod session;

pub use session::SessionStore;
