//! Review CRUD and moderation status changes
//!
//! Every mutating call here is expected to be followed by a full re-fetch
//! of the relevant list by the caller; the client never patches local
//! state in place. Drafts are validated before any network call so an
//! incomplete submission never reaches the service.

use std::path::Path;

use bookrev_core::{Review, ReviewDraft, ReviewStatus};
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::{debug, info};

use crate::{Error, Result, ReviewClient};

impl ReviewClient {
    /// Fetch all reviews visible to the caller
    ///
    /// Reviews are returned in server order; no client-side sort is
    /// applied.
    pub async fn list(&self) -> Result<Vec<Review>> {
        debug!("Fetching reviews");

        let response = self
            .authorize(self.http.get(self.endpoint("/api/reviews")))
            .send()
            .await?;
        let response = self.check_response(response).await?;

        let reviews: Vec<Review> = response.json().await?;
        debug!(count = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }

    /// Fetch reviews and keep only those with the given status
    ///
    /// The service has no status query parameter; the feed and moderation
    /// views filter the full list client-side.
    pub async fn list_with_status(&self, status: ReviewStatus) -> Result<Vec<Review>> {
        let mut reviews = self.list().await?;
        reviews.retain(|r| r.status == status);
        Ok(reviews)
    }

    /// Fetch a single review by identifier
    pub async fn get(&self, id: &str) -> Result<Review> {
        self.list()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::ReviewNotFound(id.to_string()))
    }

    /// Create a review, optionally attaching an image file
    ///
    /// The draft is validated locally first; an invalid draft never
    /// reaches the service. New reviews start in `pending` status and are
    /// owned by the calling account.
    pub async fn create(&self, draft: &ReviewDraft, image: Option<&Path>) -> Result<Review> {
        draft.validate().map_err(Error::Core)?;

        let form = self.review_form(draft, image, None).await?;
        let response = self
            .authorize(self.http.post(self.endpoint("/api/reviews")))
            .multipart(form)
            .send()
            .await?;
        let response = self.check_response(response).await?;

        let review: Review = response.json().await?;
        info!(id = %review.id, title = %review.book_title, "Review created");
        Ok(review)
    }

    /// Update an existing review
    ///
    /// Same local validation as [`create`](Self::create). When no new
    /// image is supplied, `existing_image` is re-sent so the service
    /// keeps the previous one. Last write wins; concurrent edits are not
    /// detected.
    pub async fn update(
        &self,
        id: &str,
        draft: &ReviewDraft,
        image: Option<&Path>,
        existing_image: Option<&str>,
    ) -> Result<Review> {
        draft.validate().map_err(Error::Core)?;

        let form = self.review_form(draft, image, existing_image).await?;
        let response = self
            .authorize(
                self.http
                    .put(self.endpoint(&format!("/api/reviews/{}", id))),
            )
            .multipart(form)
            .send()
            .await?;
        let response = self.not_found_as_missing(response, id).await?;

        let review: Review = response.json().await?;
        info!(id = %review.id, "Review updated");
        Ok(review)
    }

    /// Delete a review
    ///
    /// Irreversible. Callers are responsible for obtaining explicit user
    /// confirmation before invoking this.
    pub async fn delete(&self, id: &str) -> Result<()> {
        debug!(id, "Deleting review");

        let response = self
            .authorize(
                self.http
                    .delete(self.endpoint(&format!("/api/reviews/{}", id))),
            )
            .send()
            .await?;
        self.not_found_as_missing(response, id).await?;

        info!(id, "Review deleted");
        Ok(())
    }

    /// Request a moderation status change
    ///
    /// The status type is a closed enum, so an out-of-set value cannot
    /// reach the wire. Whether the caller may transition this particular
    /// review is enforced by the service, not here.
    pub async fn change_status(&self, id: &str, status: ReviewStatus) -> Result<()> {
        debug!(id, status = %status, "Changing review status");

        let response = self
            .authorize(
                self.http
                    .patch(self.endpoint(&format!("/api/reviews/{}/status", id))),
            )
            .json(&json!({ "status": status }))
            .send()
            .await?;
        self.not_found_as_missing(response, id).await?;

        info!(id, status = %status, "Review status changed");
        Ok(())
    }

    /// Build the multipart form shared by create and update
    async fn review_form(
        &self,
        draft: &ReviewDraft,
        image: Option<&Path>,
        existing_image: Option<&str>,
    ) -> Result<Form> {
        let mut form = Form::new()
            .text("bookTitle", draft.book_title.clone())
            .text("author", draft.author.clone())
            .text("rating", draft.rating.to_string())
            .text("reviewText", draft.review_text.clone());

        if let Some(path) = image {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image")
                .to_string();
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        } else if let Some(existing) = existing_image {
            // Re-send the stored filename so the service keeps the image
            form = form.text("image", existing.to_string());
        }

        Ok(form)
    }

    /// Like `check_response`, but maps 404 to `ReviewNotFound`
    async fn not_found_as_missing(
        &self,
        response: reqwest::Response,
        id: &str,
    ) -> Result<reqwest::Response> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::ReviewNotFound(id.to_string()));
        }
        self.check_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Points at a closed port; validation failures must short-circuit
    // before any connection attempt.
    fn offline_client() -> ReviewClient {
        ReviewClient::with_token("http://127.0.0.1:9", Some("token".to_string()))
    }

    fn incomplete_draft() -> ReviewDraft {
        ReviewDraft::new("", "Frank Herbert", 4.0, "Fine.")
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_draft_before_network() {
        let client = offline_client();
        let err = client.create(&incomplete_draft(), None).await.unwrap_err();
        // A network attempt would surface Error::Http instead
        assert!(matches!(
            err,
            Error::Core(bookrev_core::Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_incomplete_draft_before_network() {
        let client = offline_client();
        let err = client
            .update("42", &incomplete_draft(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(bookrev_core::Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_rating_before_network() {
        let client = offline_client();
        let draft = ReviewDraft::new("Dune", "Frank Herbert", 9.0, "Too many stars.");
        let err = client.create(&draft, None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Core(bookrev_core::Error::Validation(_))
        ));
    }
}
