use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl ApplicationStatus {
    pub fn to_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }

    /// Transition table for the application lifecycle.
    pub fn allowed_next_states(&self) -> &'static [ApplicationStatus] {
        match self {
            ApplicationStatus::Applied => {
                &[ApplicationStatus::Accepted, ApplicationStatus::Rejected]
            }
            ApplicationStatus::Accepted => {
                &[ApplicationStatus::Completed, ApplicationStatus::Cancelled]
            }
            ApplicationStatus::Rejected
            | ApplicationStatus::Completed
            | ApplicationStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        self.allowed_next_states().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next_states().is_empty()
    }
}

/// A project owner's answer to an application.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    Accept,
    Reject,
}

impl ResponseAction {
    /// Missing action means accept; any value other than "accept" rejects.
    pub fn from_form(action: Option<&str>) -> Self {
        match action.map(str::trim) {
            None | Some("accept") => ResponseAction::Accept,
            Some(_) => ResponseAction::Reject,
        }
    }

    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            ResponseAction::Accept => ApplicationStatus::Accepted,
            ResponseAction::Reject => ApplicationStatus::Rejected,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ResponseAction::Accept => "Accepted",
            ResponseAction::Reject => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub project_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub cover_letter: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn test_transition_table() {
        assert!(Applied.can_transition_to(Accepted));
        assert!(Applied.can_transition_to(Rejected));
        assert!(Accepted.can_transition_to(Completed));
        assert!(Accepted.can_transition_to(Cancelled));

        assert!(!Applied.can_transition_to(Completed));
        assert!(!Applied.can_transition_to(Applied));
        assert!(!Accepted.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Accepted));
    }

    #[test]
    fn test_terminal_states() {
        for status in [Rejected, Completed, Cancelled] {
            assert!(status.is_terminal(), "{:?} should be terminal", status);
        }
        assert!(!Applied.is_terminal());
        assert!(!Accepted.is_terminal());
    }

    #[test]
    fn test_response_action_from_form() {
        assert_eq!(ResponseAction::from_form(None), ResponseAction::Accept);
        assert_eq!(ResponseAction::from_form(Some("accept")), ResponseAction::Accept);
        assert_eq!(ResponseAction::from_form(Some("reject")), ResponseAction::Reject);
        assert_eq!(ResponseAction::from_form(Some("maybe")), ResponseAction::Reject);
        assert_eq!(ResponseAction::Reject.target_status(), Rejected);
    }

    #[test]
    fn test_labels_outlive_the_value() {
        let labels: Vec<&'static str> = {
            let statuses = vec![Applied, Cancelled];
            statuses.iter().map(|status| status.to_str()).collect()
        };
        assert_eq!(labels, ["applied", "cancelled"]);

        let verb: &'static str = {
            let action = ResponseAction::from_form(Some("reject"));
            action.past_tense()
        };
        assert_eq!(verb, "Rejected");
    }
}
