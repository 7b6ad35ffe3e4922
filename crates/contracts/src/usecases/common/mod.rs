//! Common types and traits for all UseCases

pub mod duplicate_lead;
pub mod usecase_metadata;

// Re-exports
pub use duplicate_lead::DuplicateLead;
pub use usecase_metadata::UseCaseMetadata;
