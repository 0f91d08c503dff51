//! Canonical conversation record.
//!
//! Remote list items are normalized here once, on ingestion. Everything
//! downstream (date filter, department filter, formatter) reads these fields
//! and never looks at the raw payload again.

use serde_json::{Map, Value};

use super::fields::{first_object, first_present, first_string};
use crate::domain::foundation::{ChatId, Timestamp, ValidationError};

const CREATED_KEYS: &[&str] = &["created_at", "createdAt"];
const UPDATED_KEYS: &[&str] = &["updated_at", "updatedAt"];
const ORGANIZATION_KEYS: &[&str] = &["organization_id", "organizationId"];
const CUSTOMER_KEYS: &[&str] = &["customer", "contact", "visitor"];
const ASSIGNEE_KEYS: &[&str] = &["assignee", "assigned_agent", "agent"];
const NAME_KEYS: &[&str] = &["name", "display_name", "displayName"];

/// A person attached to a conversation (customer or assignee).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Party {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            name: first_string(obj, NAME_KEYS),
            email: first_string(obj, &["email"]),
        }
    }
}

/// A support conversation as read from the list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: ChatId,
    pub organization_id: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub status: Option<String>,
    pub customer: Party,
    pub assignee: Party,
    pub department: Option<String>,
    /// Messages embedded in the list payload, still raw.
    pub inline_messages: Vec<Value>,
}

impl Conversation {
    /// Creates a bare conversation with only an id.
    pub fn new(id: ChatId) -> Self {
        Self {
            id,
            organization_id: None,
            created_at: None,
            updated_at: None,
            status: None,
            customer: Party::default(),
            assignee: Party::default(),
            department: None,
            inline_messages: Vec::new(),
        }
    }

    /// Normalizes one list item.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the item is not an object or has no id.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or_else(|| {
            ValidationError::invalid_format("conversation", "expected a JSON object")
        })?;

        let id = ChatId::from_json(obj.get("id").unwrap_or(&Value::Null))?;

        let organization_id = first_present(obj, ORGANIZATION_KEYS).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let customer = first_object(obj, CUSTOMER_KEYS)
            .map(Party::from_object)
            .unwrap_or_default();

        // Some payloads give the assignee as a plain display name.
        let assignee = match first_present(obj, ASSIGNEE_KEYS) {
            Some(Value::Object(a)) => Party::from_object(a),
            Some(Value::String(name)) => Party {
                name: Some(name.clone()),
                email: None,
            },
            _ => Party::default(),
        };

        let department = match obj.get("department") {
            Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
            Some(Value::Object(d)) => first_string(d, &["name"]).filter(|n| !n.is_empty()),
            _ => None,
        };

        let inline_messages = obj
            .get("messages")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            id,
            organization_id,
            created_at: first_present(obj, CREATED_KEYS).and_then(Timestamp::from_json),
            updated_at: first_present(obj, UPDATED_KEYS).and_then(Timestamp::from_json),
            status: first_string(obj, &["status"]),
            customer,
            assignee,
            department,
            inline_messages,
        })
    }

    /// True when the conversation was created at or after `from`.
    ///
    /// Conversations without a parsable creation time never match.
    pub fn is_created_since(&self, from: &Timestamp) -> bool {
        self.created_at.is_some_and(|created| !created.is_before(from))
    }

    /// Display name of the assigned agent, if any.
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_case_payload_is_normalized() {
        let conv = Conversation::from_json(&json!({
            "id": 1001,
            "organization_id": "org-7",
            "created_at": 1_704_067_200,
            "updated_at": "2024-01-02T00:00:00Z",
            "status": "closed",
            "customer": {"name": "Ana", "email": "ana@example.com"},
            "assignee": {"name": "Squid"},
            "department": {"name": "SQUID"}
        }))
        .unwrap();

        assert_eq!(conv.id.as_str(), "1001");
        assert_eq!(conv.organization_id.as_deref(), Some("org-7"));
        assert_eq!(conv.created_at.unwrap().date_string(), "2024-01-01");
        assert_eq!(conv.updated_at.unwrap().date_string(), "2024-01-02");
        assert_eq!(conv.status.as_deref(), Some("closed"));
        assert_eq!(conv.customer.email.as_deref(), Some("ana@example.com"));
        assert_eq!(conv.assignee_name(), Some("Squid"));
        assert_eq!(conv.department.as_deref(), Some("SQUID"));
    }

    #[test]
    fn camel_case_payload_is_normalized() {
        let conv = Conversation::from_json(&json!({
            "id": "c-1",
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-02T12:00:00Z",
            "department": "OSL"
        }))
        .unwrap();

        assert_eq!(conv.created_at.unwrap().date_string(), "2024-05-01");
        assert_eq!(conv.updated_at.unwrap().date_string(), "2024-05-02");
        assert_eq!(conv.department.as_deref(), Some("OSL"));
    }

    #[test]
    fn missing_nested_identities_default_to_none() {
        let conv = Conversation::from_json(&json!({"id": "c-2", "customer": null})).unwrap();
        assert_eq!(conv.customer, Party::default());
        assert_eq!(conv.assignee_name(), None);
        assert!(conv.department.is_none());
    }

    #[test]
    fn string_assignee_is_used_as_name() {
        let conv = Conversation::from_json(&json!({"id": "c-3", "assignee": "Jo"})).unwrap();
        assert_eq!(conv.assignee_name(), Some("Jo"));
    }

    #[test]
    fn inline_messages_are_kept_raw() {
        let conv = Conversation::from_json(&json!({
            "id": "c-4",
            "messages": [{"text": "hi"}, {"text": "there"}]
        }))
        .unwrap();
        assert_eq!(conv.inline_messages.len(), 2);
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(Conversation::from_json(&json!({"status": "open"})).is_err());
        assert!(Conversation::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn date_filter_is_inclusive_and_skips_unknown_dates() {
        let from = Timestamp::parse_str("2024-01-01").unwrap();

        let mut conv = Conversation::new(ChatId::new("x").unwrap());
        assert!(!conv.is_created_since(&from));

        conv.created_at = Some(from);
        assert!(conv.is_created_since(&from));

        conv.created_at = Timestamp::parse_str("2023-12-31T23:59:59Z");
        assert!(!conv.is_created_since(&from));
    }

    #[test]
    fn out_of_range_created_at_is_treated_as_unknown() {
        let from = Timestamp::parse_str("2024-01-01").unwrap();

        for created in [json!(-1e30), json!(i64::MIN), json!("-1e30")] {
            let conv = Conversation::from_json(&json!({"id": 1, "created_at": created})).unwrap();
            assert!(conv.created_at.is_none());
            assert!(!conv.is_created_since(&from));
        }
    }
}
