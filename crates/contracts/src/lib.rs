//! Wire contracts shared by the CRM admin frontend.
//!
//! Besides DTOs this crate holds the framework-free parts of the lead import
//! wizard (field mapping engine and wizard state machine), so they can be
//! exercised without a browser.

pub mod system;
pub mod usecases;
