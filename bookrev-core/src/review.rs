//! Review domain model and moderation status machine
//!
//! A review is created in `Pending` status by its owner. A moderator
//! approves it (`Added`, visible in the public feed) or rejects it, and
//! may revert either decision back to `Pending`. There is no direct edge
//! between `Added` and `Rejected`; reversals pass through `Pending`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Moderation status of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting moderation (initial, server-assigned at creation)
    Pending,
    /// Approved and visible in the public feed
    Added,
    /// Rejected by a moderator
    Rejected,
}

impl ReviewStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Added => "added",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Human label for display (capitalized, original badge text)
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::Added => "Added",
            ReviewStatus::Rejected => "Rejected",
        }
    }

    /// Check whether the moderation machine permits this status change
    ///
    /// Actor authorization is not checked here; the server is the
    /// authority on who may transition a review.
    pub fn can_transition_to(&self, to: ReviewStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Statuses reachable from the current one
    pub fn valid_transitions(&self) -> &'static [ReviewStatus] {
        match self {
            ReviewStatus::Pending => &[ReviewStatus::Added, ReviewStatus::Rejected],
            ReviewStatus::Added => &[ReviewStatus::Pending],
            ReviewStatus::Rejected => &[ReviewStatus::Pending],
        }
    }

    /// Validate a requested transition, returning the target on success
    pub fn transition_to(&self, to: ReviewStatus) -> Result<ReviewStatus> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(Error::InvalidTransition { from: *self, to })
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "added" => Ok(ReviewStatus::Added),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book review as stored by the server
///
/// Identifier, creation timestamp and owner are server-assigned and never
/// sent by the client. Field names follow the service's camelCase wire
/// format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Server-assigned opaque identifier
    pub id: String,
    /// Title of the reviewed book
    pub book_title: String,
    /// Author of the reviewed book
    pub author: String,
    /// Rating in [1, 5]; fractional values occur in display data
    pub rating: f32,
    /// Free-text review body
    pub review_text: String,
    /// Server-stored image filename, if any
    ///
    /// Absence means the review has no image, which is distinct from a
    /// failure to load one.
    #[serde(default)]
    pub image: Option<String>,
    /// Moderation status
    pub status: ReviewStatus,
    /// Server-assigned creation time, immutable
    pub created_at: DateTime<Utc>,
}

/// Client-side fields for creating or updating a review
///
/// Validated locally before any network call; an invalid draft never
/// reaches the server.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    /// Title of the reviewed book
    pub book_title: String,
    /// Author of the reviewed book
    pub author: String,
    /// Rating in [1, 5]
    pub rating: f32,
    /// Free-text review body
    pub review_text: String,
}

impl ReviewDraft {
    /// Create a draft from raw field values
    pub fn new(
        book_title: impl Into<String>,
        author: impl Into<String>,
        rating: f32,
        review_text: impl Into<String>,
    ) -> Self {
        Self {
            book_title: book_title.into(),
            author: author.into(),
            rating,
            review_text: review_text.into(),
        }
    }

    /// Check all required fields before submission
    ///
    /// Mirrors the server's required fields: book title, author, rating
    /// and review text must all be present, and the rating must fall in
    /// [1, 5].
    pub fn validate(&self) -> Result<()> {
        if self.book_title.trim().is_empty() {
            return Err(Error::Validation("book title must not be empty".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(Error::Validation("author must not be empty".to_string()));
        }
        if !(1.0..=5.0).contains(&self.rating) {
            return Err(Error::Validation(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        if self.review_text.trim().is_empty() {
            return Err(Error::Validation("review text must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ReviewDraft {
        ReviewDraft::new("Dune", "Frank Herbert", 4.5, "A slow burn that pays off.")
    }

    #[test]
    fn test_pending_can_be_approved_or_rejected() {
        assert!(ReviewStatus::Pending.can_transition_to(ReviewStatus::Added));
        assert!(ReviewStatus::Pending.can_transition_to(ReviewStatus::Rejected));
    }

    #[test]
    fn test_decisions_revert_through_pending_only() {
        assert!(ReviewStatus::Added.can_transition_to(ReviewStatus::Pending));
        assert!(ReviewStatus::Rejected.can_transition_to(ReviewStatus::Pending));
        // No direct edge between the two decisions
        assert!(!ReviewStatus::Added.can_transition_to(ReviewStatus::Rejected));
        assert!(!ReviewStatus::Rejected.can_transition_to(ReviewStatus::Added));
    }

    #[test]
    fn test_self_transition_rejected() {
        assert!(!ReviewStatus::Pending.can_transition_to(ReviewStatus::Pending));
        assert!(!ReviewStatus::Added.can_transition_to(ReviewStatus::Added));
    }

    #[test]
    fn test_transition_to_returns_error_with_context() {
        let err = ReviewStatus::Added
            .transition_to(ReviewStatus::Rejected)
            .unwrap_err();
        assert!(err.to_string().contains("from added to rejected"));
    }

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!("pending".parse::<ReviewStatus>().unwrap(), ReviewStatus::Pending);
        assert_eq!("added".parse::<ReviewStatus>().unwrap(), ReviewStatus::Added);
        assert_eq!("rejected".parse::<ReviewStatus>().unwrap(), ReviewStatus::Rejected);
    }

    #[test]
    fn test_parse_unknown_status_rejected() {
        let err = "approved".parse::<ReviewStatus>().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(ref s) if s == "approved"));
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ReviewStatus::Added).unwrap(), "\"added\"");
        let status: ReviewStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, ReviewStatus::Rejected);
    }

    #[test]
    fn test_review_wire_format() {
        let json = r#"{
            "id": "42",
            "bookTitle": "Dune",
            "author": "Frank Herbert",
            "rating": 4.5,
            "reviewText": "A slow burn that pays off.",
            "status": "pending",
            "createdAt": "2024-11-02T09:30:00Z"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.book_title, "Dune");
        assert_eq!(review.status, ReviewStatus::Pending);
        assert!(review.image.is_none());
    }

    #[test]
    fn test_lifecycle_through_feed_filter() {
        let mut review = Review {
            id: "1".to_string(),
            book_title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            rating: 4.5,
            review_text: "A slow burn that pays off.".to_string(),
            image: None,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        };

        let in_feed = |r: &Review| r.status == ReviewStatus::Added;

        // Freshly created reviews are pending and not in the feed
        assert!(!in_feed(&review));

        // Approval puts the review into the feed
        review.status = review.status.transition_to(ReviewStatus::Added).unwrap();
        assert!(in_feed(&review));

        // Reverting removes it again; the only way back is via pending
        review.status = review.status.transition_to(ReviewStatus::Pending).unwrap();
        assert!(!in_feed(&review));
        assert!(review
            .status
            .transition_to(ReviewStatus::Rejected)
            .is_ok());
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut draft = valid_draft();
        draft.book_title = "  ".to_string();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.author = String::new();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.review_text = String::new();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let mut draft = valid_draft();
        draft.rating = 0.0;
        assert!(draft.validate().is_err());
        draft.rating = 5.5;
        assert!(draft.validate().is_err());
        draft.rating = 5.0;
        assert!(draft.validate().is_ok());
    }
}
