//! Session storage and role resolution
//!
//! The bearer token returned by the login endpoint is stored at
//! `~/.config/bookrev/session.toml` with restrictive permissions (0600 on
//! Unix). The `BOOKREV_TOKEN` environment variable overrides the file.
//!
//! The role claim is read from the token payload without verifying the
//! signature. It is a navigation hint only and never a substitute for the
//! server's own authorization checks.

use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Acting role carried in the token payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular reviewer
    User,
    /// Moderator
    Admin,
}

impl Role {
    /// Wire representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Unverified claims carried in the token payload
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    role: Option<String>,
}

/// A stored login session
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Session {
    /// Bearer token issued at login
    pub token: String,
}

impl Session {
    /// Create a session from a freshly issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Load the current session, if any
    ///
    /// Priority: `BOOKREV_TOKEN` env var, then the session file. Returns
    /// `Ok(None)` when neither is present.
    pub fn load() -> Result<Option<Self>> {
        if let Ok(token) = std::env::var("BOOKREV_TOKEN") {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!("Using token from BOOKREV_TOKEN environment variable");
                return Ok(Some(Self::new(token)));
            }
        }

        if let Some(path) = Self::default_session_path() {
            if path.exists() {
                return Self::load_from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Load a session from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Session file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut session: Session = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse session file: {}", e)))?;
        session.token = session.token.trim().to_string();

        Ok(session)
    }

    /// Persist the session to the default location with 0600 permissions
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_session_path()
            .ok_or_else(|| Error::Config("Could not determine session path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        let contents = toml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize session: {}", e)))?;
        std::fs::write(&path, contents).map_err(Error::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms).map_err(Error::Io)?;
        }

        debug!(path = %path.display(), "Session saved");
        Ok(path)
    }

    /// Remove the stored session file
    ///
    /// Returns `true` if a file was removed. This is the only session
    /// teardown; in-memory state is per-invocation.
    pub fn clear() -> Result<bool> {
        let Some(path) = Self::default_session_path() else {
            return Ok(false);
        };

        if path.exists() {
            std::fs::remove_file(&path).map_err(Error::Io)?;
            debug!(path = %path.display(), "Session cleared");
            return Ok(true);
        }

        Ok(false)
    }

    /// Get the default session file path
    ///
    /// Returns `~/.config/bookrev/session.toml` on Unix
    pub fn default_session_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bookrev").join("session.toml"))
    }

    /// Resolve the role hint carried in this session's token
    pub fn role(&self) -> Option<Role> {
        resolve_role(&self.token)
    }
}

/// Decode the role claim from a bearer token, if possible
///
/// The token is expected to be three dot-separated segments with a
/// base64url JSON payload in the middle. Any malformation (wrong segment
/// count, bad encoding, bad JSON, missing claim, unknown role) degrades to
/// `None` rather than an error: an unreadable credential means the least
/// privileged state.
///
/// The payload signature is NOT verified. The result gates which commands
/// the CLI offers; the server independently authorizes every request.
pub fn resolve_role(token: &str) -> Option<Role> {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        warn!("Stored token does not have three segments, treating as unauthenticated");
        return None;
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&decoded).ok()?;

    match claims.role.as_deref() {
        Some("user") => Some(Role::User),
        Some("admin") => Some(Role::Admin),
        Some(other) => {
            warn!(role = other, "Unknown role claim in token");
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn make_token(payload_json: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(payload_json.as_bytes());
        format!("header.{}.signature", payload)
    }

    #[test]
    fn test_resolve_admin_role() {
        let token = make_token(r#"{"sub":"alice","role":"admin"}"#);
        assert_eq!(resolve_role(&token), Some(Role::Admin));
    }

    #[test]
    fn test_resolve_user_role() {
        let token = make_token(r#"{"role":"user"}"#);
        assert_eq!(resolve_role(&token), Some(Role::User));
    }

    #[test]
    fn test_unknown_role_degrades_to_none() {
        let token = make_token(r#"{"role":"superuser"}"#);
        assert_eq!(resolve_role(&token), None);
    }

    #[test]
    fn test_missing_role_claim() {
        let token = make_token(r#"{"sub":"alice"}"#);
        assert_eq!(resolve_role(&token), None);
    }

    #[test]
    fn test_malformed_tokens_never_error() {
        assert_eq!(resolve_role(""), None);
        assert_eq!(resolve_role("not-a-jwt"), None);
        assert_eq!(resolve_role("a.b"), None);
        assert_eq!(resolve_role("a.b.c.d"), None);
        // Valid structure, invalid base64
        assert_eq!(resolve_role("header.!!!.signature"), None);
        // Valid base64, invalid JSON
        let garbage = URL_SAFE_NO_PAD.encode(b"not json");
        assert_eq!(resolve_role(&format!("h.{}.s", garbage)), None);
    }

    #[test]
    fn test_parse_session_file() {
        let toml = r#"token = "abc.def.ghi""#;
        let session: Session = toml::from_str(toml).unwrap();
        assert_eq!(session.token, "abc.def.ghi");
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "token = \"abc\"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let result = Session::load_from_file(&file.path().to_path_buf());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("insecure permissions"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_permissions_accepted() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "token = \"  abc.def.ghi  \"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let session = Session::load_from_file(&file.path().to_path_buf()).unwrap();
        // Whitespace is trimmed on load
        assert_eq!(session.token, "abc.def.ghi");
    }
}
