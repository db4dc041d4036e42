//! CLI command implementations

pub mod auth;
pub mod feed;
pub mod moderate;
pub mod review;

use std::io::{self, Write};

use bookrev_core::{Role, Session};

pub use auth::{logout, AuthArgs, RegisterArgs};
pub use feed::FeedArgs;
pub use moderate::ModerateArgs;
pub use review::ReviewArgs;

/// Ask the user a yes/no question and wait for the decision
///
/// Irreversible flows (delete, logout) do not proceed until this
/// returns; declining leaves all state untouched and issues no network
/// call. `assume_yes` supports scripting via `--yes`.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    read_decision(io::stdin().lock())
}

/// Read a yes/no answer from the given input
///
/// Only an explicit "y" or "yes" (case-insensitive) counts as consent;
/// anything else, including an empty line, declines.
fn read_decision(mut input: impl io::BufRead) -> io::Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();

    Ok(answer == "y" || answer == "yes")
}

/// Require a logged-in session
///
/// The session is resolved once at startup and injected; commands never
/// read stored state themselves.
pub(crate) fn require_session(session: Option<&Session>) -> anyhow::Result<&Session> {
    session.ok_or_else(|| anyhow::anyhow!("Not logged in. Run `bookrev login` first."))
}

/// Require a logged-in session whose token carries the admin role hint
///
/// This only gates what the CLI offers; the service independently
/// authorizes every moderation request.
pub(crate) fn require_admin_hint(session: Option<&Session>) -> anyhow::Result<&Session> {
    let session = require_session(session)?;
    match session.role() {
        Some(Role::Admin) => Ok(session),
        Some(Role::User) => Err(anyhow::anyhow!(
            "Moderation requires an admin account (current role: user)"
        )),
        None => Err(anyhow::anyhow!(
            "Moderation requires an admin account (stored token has no readable role)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declining_answers_read_as_false() {
        // Delete and logout stop here on decline, before any network call
        assert!(!read_decision("n\n".as_bytes()).unwrap());
        assert!(!read_decision("no\n".as_bytes()).unwrap());
        assert!(!read_decision("\n".as_bytes()).unwrap());
        assert!(!read_decision("".as_bytes()).unwrap());
        assert!(!read_decision("maybe\n".as_bytes()).unwrap());
    }

    #[test]
    fn test_consenting_answers_read_as_true() {
        assert!(read_decision("y\n".as_bytes()).unwrap());
        assert!(read_decision("yes\n".as_bytes()).unwrap());
        assert!(read_decision("  YES  \n".as_bytes()).unwrap());
        assert!(read_decision("Y\r\n".as_bytes()).unwrap());
    }

    #[test]
    fn test_assume_yes_skips_the_prompt() {
        // No stdin read happens on the --yes path
        assert!(confirm("irrelevant", true).unwrap());
    }
}
