//! Audit records for company and transfer mutations
//!
//! Entries carry JSON snapshots of the entity rather than typed values, so
//! the log stays readable after the models change shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
        })
    }
}

/// Entity the mutation applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Company,
    Transfer,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntityType::Company => "Company",
            EntityType::Transfer => "Transfer",
        })
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    /// Short display id (`cmp-…`, `trf-…`)
    pub entity_id: String,
    /// Legal name of the company involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn stamped(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly saved entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::stamped(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Entry for a changed entity, with a field-level summary of the change
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = before
            .as_ref()
            .zip(after.as_ref())
            .and_then(|(b, a)| generate_diff(b, a));

        Self {
            before,
            after,
            diff_summary,
            ..Self::stamped(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    /// `[timestamp] OP Entity id (name)` plus an indented change line
    pub fn format_human_readable(&self) -> String {
        let name = self
            .entity_name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default();
        let mut line = format!(
            "[{}] {} {} {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id,
            name
        );

        if let Some(diff) = &self.diff_summary {
            line.push_str("\n  Changes: ");
            line.push_str(diff);
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_names() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(EntityType::Company.to_string(), "Company");
        assert_eq!(EntityType::Transfer.to_string(), "Transfer");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::Company,
            "cmp-12345678",
            Some("Acme S.A.".to_string()),
            &json!({"tax_id": "20123456789"}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["tax_id"], "20123456789");
    }

    #[test]
    fn test_update_entry_carries_diff() {
        let entry = AuditEntry::update(
            EntityType::Company,
            "cmp-12345678",
            None,
            &json!({"adhesion_date": null}),
            &json!({"adhesion_date": "2024-02-10"}),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("adhesion_date: null -> \"2024-02-10\"")
        );
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Company,
            "cmp-12345678",
            Some("Acme S.A.".to_string()),
            &json!({"legal_name": "Acme"}),
            &json!({"legal_name": "Acme S.A."}),
        );

        let text = entry.format_human_readable();
        assert!(text.contains("UPDATE Company cmp-12345678 (Acme S.A.)"));
        assert!(text.contains("Changes: legal_name"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::create(EntityType::Transfer, "trf-1", None, &json!({}));
        let text = serde_json::to_string(&entry).unwrap();
        assert!(text.contains("\"operation\":\"create\""));
        assert!(text.contains("\"entity_type\":\"transfer\""));
        assert!(!text.contains("entity_name"));
        assert!(!text.contains("diff_summary"));
    }
}
