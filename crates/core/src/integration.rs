//! Integration catalog and added-integration records
//!
//! The catalog is the fixed menu of services a link can be attached to.
//! Adding a link produces an [`AddedIntegration`] record that starts out
//! resolving and is later marked resolved or errored by whoever talks to
//! the backend.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Logo glyphs for the services the catalog knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logo {
    Asana,
    Figma,
    Linear,
    Miro,
    Notion,
}

/// An entry in the add-integration menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: u32,

    /// Title displayed in the integrations menu
    pub title: String,

    /// Logo displayed next to the title
    pub logo: Logo,

    /// Disabled integrations are listed but cannot be selected
    pub disabled: bool,
}

/// The integrations offered in the add menu
pub fn catalog() -> Vec<Integration> {
    let entries = [
        (1, "Asana ticket", Logo::Asana, false),
        (2, "Figma file", Logo::Figma, false),
        (3, "Linear ticket", Logo::Linear, false),
        (4, "Miro board", Logo::Miro, true),
        (5, "Notion page", Logo::Notion, false),
    ];
    entries
        .into_iter()
        .map(|(id, title, logo, disabled)| Integration {
            id,
            title: title.to_string(),
            logo,
            disabled,
        })
        .collect()
}

/// Resolution status of an added integration link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    /// Sent to the backend, waiting for metadata
    Resolving,
    /// Metadata arrived
    Resolved,
    /// The backend did not recognize the link
    Error,
}

/// A link the user attached, plus what it resolved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedIntegration {
    pub id: Uuid,
    pub link: Url,
    pub integration: Integration,
    pub status: IntegrationStatus,
    pub resolved_title: Option<String>,
    pub resolved_subtitle: Option<String>,
}

impl AddedIntegration {
    /// Create a record in the resolving state
    pub fn new(integration: Integration, link: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            link,
            integration,
            status: IntegrationStatus::Resolving,
            resolved_title: None,
            resolved_subtitle: None,
        }
    }

    /// Record the metadata the backend resolved the link to
    pub fn mark_resolved(&mut self, title: impl Into<String>, subtitle: impl Into<String>) {
        self.status = IntegrationStatus::Resolved;
        self.resolved_title = Some(title.into());
        self.resolved_subtitle = Some(subtitle.into());
    }

    /// Mark the link as unrecognized
    pub fn mark_error(&mut self) {
        self.status = IntegrationStatus::Error;
    }

    pub fn has_error(&self) -> bool {
        self.status == IntegrationStatus::Error
    }

    pub fn is_resolving(&self) -> bool {
        self.status == IntegrationStatus::Resolving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> Integration {
        catalog()
            .into_iter()
            .find(|integration| integration.logo == Logo::Linear)
            .unwrap()
    }

    #[test]
    fn test_catalog_contents() {
        let entries = catalog();

        assert_eq!(entries.len(), 5);
        assert!(entries.iter().any(|entry| entry.title == "Asana ticket"));
        assert!(entries.iter().any(|entry| entry.title == "Notion page"));

        // Only the Miro board is disabled
        let disabled: Vec<_> = entries.iter().filter(|entry| entry.disabled).collect();
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].logo, Logo::Miro);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let entries = catalog();
        for entry in &entries {
            assert_eq!(
                entries.iter().filter(|other| other.id == entry.id).count(),
                1
            );
        }
    }

    #[test]
    fn test_new_record_starts_resolving() {
        let link = Url::parse("https://linear.app/team/DSN-556").unwrap();
        let record = AddedIntegration::new(linear(), link);

        assert!(record.is_resolving());
        assert!(!record.has_error());
        assert!(record.resolved_title.is_none());
    }

    #[test]
    fn test_record_ids_are_unique() {
        let link = Url::parse("https://example.com/a").unwrap();
        let first = AddedIntegration::new(linear(), link.clone());
        let second = AddedIntegration::new(linear(), link);

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_status_transitions() {
        let link = Url::parse("https://linear.app/team/DSN-556").unwrap();
        let mut record = AddedIntegration::new(linear(), link);

        record.mark_resolved("DSN-556", "Design Spec");
        assert_eq!(record.status, IntegrationStatus::Resolved);
        assert_eq!(record.resolved_title.as_deref(), Some("DSN-556"));
        assert_eq!(record.resolved_subtitle.as_deref(), Some("Design Spec"));

        record.mark_error();
        assert!(record.has_error());
    }

    #[test]
    fn test_added_integration_round_trips_through_json() {
        let link = Url::parse("https://linear.app/team/DSN-556").unwrap();
        let mut record = AddedIntegration::new(linear(), link);
        record.mark_resolved("DSN-556", "Design Spec");

        let json = serde_json::to_string(&record).unwrap();
        let back: AddedIntegration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&IntegrationStatus::Resolving).unwrap(),
            "\"resolving\""
        );
    }
}
