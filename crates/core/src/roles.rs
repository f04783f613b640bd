//! Role names carried in access token claims.

/// Full access to the admin area.
pub const ROLE_ADMIN: &str = "admin";
