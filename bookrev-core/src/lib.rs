//! Bookrev Core - Domain library for the bookrev review client
//!
//! This crate provides the review domain model, the moderation status
//! machine, session and role handling, configuration, and the pure
//! display helpers shared by the CLI.

pub mod config;
pub mod display;
pub mod error;
pub mod review;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use review::{Review, ReviewDraft, ReviewStatus};
pub use session::{Role, Session};
