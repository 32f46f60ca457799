//! # Medify Authentication
//!
//! Session-based authentication gating for Medify.
//!
//! The triage and dispatch subsystems never own authentication state. They
//! consume the read-only [`AuthGate`] trait, and refuse to act with
//! [`AuthError::AuthRequired`] when nobody is logged in.
//!
//! ## Architecture
//!
//! ```text
//! SessionGate ──owns──▶ current user (in memory)
//!      │
//!      └──persists──▶ SessionStore["currentUser"] = JSON(User)
//! ```
//!
//! The session is an explicit context object: created at startup with
//! [`SessionGate::restore`], updated by `login`/`signup`, torn down by
//! `logout`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use medify_auth::{AuthGate, MemorySessionStore, SessionGate};
//!
//! let gate = SessionGate::restore(MemorySessionStore::new(), Arc::new(SystemClock)).await?;
//! let user = gate.login("asha@example.com", "secret").await?;
//! assert!(gate.is_authenticated());
//! gate.logout().await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod constants;
pub mod error;
pub mod gate;
pub mod providers;
pub mod state;
pub mod stores;

// Re-export main types for convenience
pub use constants::CURRENT_USER_KEY;
pub use error::{AuthError, Result};
pub use gate::{AuthGate, SessionGate};
pub use providers::SessionStore;
pub use state::{User, UserId};
pub use stores::MemorySessionStore;
