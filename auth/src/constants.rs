//! Authentication constants.

/// Session store key holding the serialized current user.
pub const CURRENT_USER_KEY: &str = "currentUser";
