//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is editable

pub mod claim;
pub mod contract;
pub mod csu;
pub mod lead;
pub mod onboarding;
pub mod session;
pub mod user;
