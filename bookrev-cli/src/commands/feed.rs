//! Public feed of approved reviews

use bookrev_api::ReviewClient;
use bookrev_core::display::{format_timestamp, render_stars};
use bookrev_core::{Config, ReviewStatus, Session};
use clap::Args;

/// Show the public feed of approved reviews
#[derive(Args, Debug)]
pub struct FeedArgs {}

impl FeedArgs {
    /// Execute the feed command
    pub async fn execute(&self, config: &Config, session: Option<&Session>) -> anyhow::Result<()> {
        let client = ReviewClient::for_session(config, session);
        let reviews = client.list_with_status(ReviewStatus::Added).await?;

        if reviews.is_empty() {
            println!("Approved reviews will appear here.");
            return Ok(());
        }

        println!("Reviews Feed ({} approved)", reviews.len());
        println!();

        for review in &reviews {
            println!("{} — {}", review.book_title, review.author);
            println!("  {} ({}/5)", render_stars(review.rating), review.rating);
            println!("  {}", review.review_text);
            if let Some(image) = &review.image {
                println!("  Image: {}", client.image_url(image));
            }
            println!("  {}", format_timestamp(&review.created_at));
            println!();
        }

        Ok(())
    }
}
