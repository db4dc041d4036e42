//! Login, registration and logout

use std::io::{self, Write};

use bookrev_api::ReviewClient;
use bookrev_core::{Config, Role, Session};
use clap::{Args, ValueEnum};

use super::confirm;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Log in to the review service
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Account email
    pub email: String,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Role to log in as
    #[arg(short, long, value_enum, default_value = "user")]
    pub role: RoleArg,
}

impl AuthArgs {
    /// Execute the login command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let password = match &self.password {
            Some(p) => p.clone(),
            None => prompt_password()?,
        };

        // Login never carries a stale token
        let client = ReviewClient::with_token(&config.api.base_url, None);
        let token = client.login(&self.email, &password, self.role.into()).await?;

        let session = Session::new(token);
        let path = session.save()?;

        println!("Logged in as {}.", self.email);
        match session.role() {
            Some(role) => println!("Role: {}", role.as_str()),
            None => println!("Warning: token carries no readable role claim."),
        }
        tracing::debug!(path = %path.display(), "Session stored");

        Ok(())
    }
}

/// Register a new account
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    pub email: String,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Role to register as
    #[arg(short, long, value_enum, default_value = "user")]
    pub role: RoleArg,
}

impl RegisterArgs {
    /// Execute the register command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let password = match &self.password {
            Some(p) => p.clone(),
            None => prompt_password()?,
        };

        let client = ReviewClient::with_token(&config.api.base_url, None);
        client
            .register(&self.email, &password, self.role.into())
            .await?;

        println!("Account registered. Run `bookrev login {}` to sign in.", self.email);
        Ok(())
    }
}

/// Clear the stored session after confirmation
pub fn logout(assume_yes: bool) -> anyhow::Result<()> {
    if !confirm("Log out of the review service?", assume_yes)? {
        println!("Logout cancelled.");
        return Ok(());
    }

    if Session::clear()? {
        println!("Logged out.");
    } else {
        println!("No stored session to clear.");
    }

    Ok(())
}

/// Prompt for a password on stdin
///
/// Input is echoed by the terminal; pass `--password` or pipe stdin when
/// that matters.
fn prompt_password() -> io::Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
