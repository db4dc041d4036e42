//! Moderation surface for pending reviews
//!
//! The admin check here is a navigation hint derived from the unverified
//! token payload; the service authorizes every status change on its own.

use bookrev_api::ReviewClient;
use bookrev_core::{Config, ReviewStatus, Session};
use clap::{Args, Subcommand};

use super::require_admin_hint;
use super::review::print_review_table;

/// Moderate pending reviews
#[derive(Args, Debug)]
pub struct ModerateArgs {
    #[command(subcommand)]
    pub command: ModerateCommand,
}

#[derive(Subcommand, Debug)]
pub enum ModerateCommand {
    /// List reviews awaiting moderation
    List,

    /// Approve a pending review (pending -> added)
    Approve {
        /// Review identifier
        id: String,
    },

    /// Reject a pending review (pending -> rejected)
    Reject {
        /// Review identifier
        id: String,
    },

    /// Send a decided review back to the queue (-> pending)
    Revert {
        /// Review identifier
        id: String,
    },

    /// Set an explicit status
    Status {
        /// Review identifier
        id: String,

        /// Target status: pending, added or rejected
        status: String,
    },
}

impl ModerateArgs {
    /// Execute the moderation command
    pub async fn execute(
        &self,
        verbose: bool,
        config: &Config,
        session: Option<&Session>,
    ) -> anyhow::Result<()> {
        let session = require_admin_hint(session)?;
        let client = ReviewClient::for_session(config, Some(session));

        match &self.command {
            ModerateCommand::List => {
                let pending = client.list_with_status(ReviewStatus::Pending).await?;
                if pending.is_empty() {
                    println!("No pending reviews available.");
                } else {
                    println!("Pending reviews ({})", pending.len());
                    println!();
                    print_review_table(&pending);
                }
            }
            ModerateCommand::Approve { id } => {
                change_status(&client, id, ReviewStatus::Added, verbose).await?;
            }
            ModerateCommand::Reject { id } => {
                change_status(&client, id, ReviewStatus::Rejected, verbose).await?;
            }
            ModerateCommand::Revert { id } => {
                change_status(&client, id, ReviewStatus::Pending, verbose).await?;
            }
            ModerateCommand::Status { id, status } => {
                // Unknown status values are rejected here, before any
                // network call
                let target: ReviewStatus = status.parse()?;
                change_status(&client, id, target, verbose).await?;
            }
        }

        Ok(())
    }
}

async fn change_status(
    client: &ReviewClient,
    id: &str,
    target: ReviewStatus,
    verbose: bool,
) -> anyhow::Result<()> {
    let review = client.get(id).await?;

    // Decisions revert through pending only
    review.status.transition_to(target)?;

    client.change_status(id, target).await?;
    println!("Review {} status updated to {}.", id, target);

    if verbose {
        tracing::info!(id, from = %review.status, to = %target, "Status changed");
    }

    // Refresh the moderation queue from the server
    let pending = client.list_with_status(ReviewStatus::Pending).await?;
    if pending.is_empty() {
        println!("No pending reviews remaining.");
    } else {
        println!();
        print_review_table(&pending);
    }

    Ok(())
}
