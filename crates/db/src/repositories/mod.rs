//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod claim_repo;
pub mod contract_repo;
pub mod csu_repo;
pub mod lead_repo;
pub mod onboarding_repo;
pub mod session_repo;
pub mod user_repo;

pub use claim_repo::ClaimRepo;
pub use contract_repo::ContractRepo;
pub use csu_repo::CsuRepo;
pub use lead_repo::LeadRepo;
pub use onboarding_repo::OnboardingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
