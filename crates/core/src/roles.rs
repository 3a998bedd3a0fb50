//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000001_create_users.sql`.

pub const ROLE_MASTER: &str = "master";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AFFILIATE: &str = "affiliate";
pub const ROLE_USER: &str = "user";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_MASTER, ROLE_ADMIN, ROLE_AFFILIATE, ROLE_USER];

/// Whether the role may use the admin dashboard.
pub fn is_admin_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MASTER
}
