//! Domain types and pure logic for the Frontline intake and onboarding
//! service. Nothing here touches the database or HTTP.

pub mod agreement_pdf;
pub mod claims;
pub mod contract_template;
pub mod dashboard;
pub mod error;
pub mod hashing;
pub mod intake;
pub mod lead;
pub mod nullable;
pub mod onboarding;
pub mod roles;
pub mod sign_all;
pub mod signature;
pub mod signing;
pub mod tokens;
pub mod types;
