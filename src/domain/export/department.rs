//! Department filter with assignee-based backfill.

use crate::domain::conversation::Conversation;

/// Department assigned when the assignee is the sentinel agent.
pub const SQUID_DEPARTMENT: &str = "SQUID";

/// Department assigned to every other conversation lacking one.
pub const DEFAULT_DEPARTMENT: &str = "OSL";

/// Keeps conversations belonging to one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentFilter {
    department: Option<String>,
    squid_agent_name: String,
}

impl DepartmentFilter {
    /// Creates a filter. `department = None` keeps everything.
    pub fn new(department: Option<String>, squid_agent_name: impl Into<String>) -> Self {
        Self {
            department,
            squid_agent_name: squid_agent_name.into(),
        }
    }

    /// The department being kept, if any.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Fills in a missing department from the assignee name.
    pub fn backfill(&self, conversation: &mut Conversation) {
        if conversation.department.is_some() {
            return;
        }
        let department = if conversation.assignee_name() == Some(self.squid_agent_name.as_str()) {
            SQUID_DEPARTMENT
        } else {
            DEFAULT_DEPARTMENT
        };
        conversation.department = Some(department.to_string());
    }

    /// Backfills departments and drops conversations outside the filter.
    ///
    /// Order is preserved.
    pub fn apply(&self, conversations: Vec<Conversation>) -> Vec<Conversation> {
        conversations
            .into_iter()
            .map(|mut conversation| {
                self.backfill(&mut conversation);
                conversation
            })
            .filter(|conversation| match &self.department {
                Some(wanted) => conversation.department.as_deref() == Some(wanted.as_str()),
                None => true,
            })
            .collect()
    }
}
