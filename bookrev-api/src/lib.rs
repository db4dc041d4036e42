//! Bookrev API - HTTP client for the review service
//!
//! This crate wraps the remote review collection: authentication, review
//! CRUD with multipart image upload, and moderation status changes. Local
//! validation runs before any network call; everything else is enforced
//! server-side.

mod auth;
mod client;
mod error;
mod reviews;

pub use client::ReviewClient;
pub use error::{Error, Result};
