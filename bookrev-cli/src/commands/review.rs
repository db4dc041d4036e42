//! Owner-side review management

use std::path::PathBuf;

use bookrev_api::ReviewClient;
use bookrev_core::display::{format_timestamp, truncate};
use bookrev_core::{Config, Review, ReviewDraft, Session};
use clap::{Args, Subcommand};

use super::{confirm, require_session};

const REVIEW_PREVIEW_CHARS: usize = 50;

/// Manage your own reviews
#[derive(Args, Debug)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    /// List your reviews
    List,

    /// Show one review in full
    Show {
        /// Review identifier
        id: String,
    },

    /// Submit a new review (created in pending status)
    Create {
        /// Book title
        #[arg(short, long)]
        title: String,

        /// Book author
        #[arg(short, long)]
        author: String,

        /// Rating from 1 to 5
        #[arg(short, long)]
        rating: f32,

        /// Review text
        #[arg(long)]
        text: String,

        /// Path to an image file to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Edit an existing review
    Edit {
        /// Review identifier
        id: String,

        /// New book title
        #[arg(short, long)]
        title: Option<String>,

        /// New book author
        #[arg(short, long)]
        author: Option<String>,

        /// New rating from 1 to 5
        #[arg(short, long)]
        rating: Option<f32>,

        /// New review text
        #[arg(long)]
        text: Option<String>,

        /// Path to a replacement image file
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Delete a review (asks for confirmation)
    Delete {
        /// Review identifier
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(
        &self,
        verbose: bool,
        config: &Config,
        session: Option<&Session>,
    ) -> anyhow::Result<()> {
        let session = require_session(session)?;
        let client = ReviewClient::for_session(config, Some(session));

        match &self.command {
            ReviewCommand::List => {
                let reviews = client.list().await?;
                print_review_table(&reviews);
            }
            ReviewCommand::Show { id } => {
                let review = client.get(id).await?;
                print_review_details(&client, &review);
            }
            ReviewCommand::Create {
                title,
                author,
                rating,
                text,
                image,
            } => {
                let draft = ReviewDraft::new(title.clone(), author.clone(), *rating, text.clone());
                let review = client.create(&draft, image.as_deref()).await?;
                println!(
                    "Review {} created, awaiting moderation.",
                    review.id
                );

                // The list shown is always a fresh server read
                let reviews = client.list().await?;
                print_review_table(&reviews);
            }
            ReviewCommand::Edit {
                id,
                title,
                author,
                rating,
                text,
                image,
            } => {
                // Prefill from the stored review, like the edit form
                let existing = client.get(id).await?;

                let draft = ReviewDraft::new(
                    title.clone().unwrap_or_else(|| existing.book_title.clone()),
                    author.clone().unwrap_or_else(|| existing.author.clone()),
                    rating.unwrap_or(existing.rating),
                    text.clone().unwrap_or_else(|| existing.review_text.clone()),
                );

                let updated = client
                    .update(id, &draft, image.as_deref(), existing.image.as_deref())
                    .await?;
                if verbose {
                    tracing::info!(id = %updated.id, "Review updated");
                }
                println!("Review {} updated.", updated.id);

                let reviews = client.list().await?;
                print_review_table(&reviews);
            }
            ReviewCommand::Delete { id, yes } => {
                if !confirm(
                    &format!("Delete review {}? This cannot be undone.", id),
                    *yes,
                )? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                client.delete(id).await?;
                println!("Review {} deleted.", id);

                let reviews = client.list().await?;
                print_review_table(&reviews);
            }
        }

        Ok(())
    }
}

/// Render reviews as a table, one line per review
pub(crate) fn print_review_table(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("You have not created any reviews yet.");
        return;
    }

    println!(
        "{:<8} {:<24} {:<18} {:>6}  {:<51} {:<10} {}",
        "ID", "Book Title", "Author", "Rating", "Review", "Status", "Created"
    );

    for review in reviews {
        println!(
            "{:<8} {:<24} {:<18} {:>6}  {:<51} {:<10} {}",
            truncate(&review.id, 7),
            truncate(&review.book_title, 23),
            truncate(&review.author, 17),
            review.rating,
            truncate(&review.review_text, REVIEW_PREVIEW_CHARS),
            review.status.label(),
            format_timestamp(&review.created_at),
        );
    }
}

/// Render one review in full (the "more info" view)
pub(crate) fn print_review_details(client: &ReviewClient, review: &Review) {
    println!("Book Title: {}", review.book_title);
    println!("Author:     {}", review.author);
    println!("Rating:     {}/5", review.rating);
    println!("Review:     {}", review.review_text);
    println!("Status:     {}", review.status.label());
    println!("Created:    {}", format_timestamp(&review.created_at));
    match &review.image {
        Some(image) => println!("Image:      {}", client.image_url(image)),
        None => println!("Image:      (none)"),
    }
}
