//! Linkdock Core Library
//!
//! Domain model for the integrations feature: the catalog of link
//! integrations a user can attach, the records created when they attach
//! one, and link validation.

mod integration;
mod link;

// Re-export public API
pub use integration::{catalog, AddedIntegration, Integration, IntegrationStatus, Logo};
pub use link::{parse_link, LinkError};
pub use url::Url;
