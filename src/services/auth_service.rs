use std::fmt::Write as _;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::house::{AcademicYear, Department};
use crate::models::session::Session;

/// SHA-256 digests of the per-department security keys. The keys themselves
/// never appear in the binary.
const DEPARTMENT_KEY_DIGESTS: [(Department, &str); 7] = [
    (
        Department::Admin,
        "6e13fc1a064a1c9ae0f46059232e08a61a39e04fe641cc0a0dda043b845e1e86",
    ),
    (
        Department::Mech,
        "6a92bc8f280e1d54f65f886d33d6f94f93a03a88e8c1b1f9fe2f9adbac30a9e0",
    ),
    (
        Department::Eee,
        "053097da6138095683a8807efa328ed92271dfa2f4e4e24bbd9860daa5aac602",
    ),
    (
        Department::Civil,
        "c54f4bc2c60b561ee68ef49aa6e05f8f6d4837d01f8eeee5164236454a793020",
    ),
    (
        Department::Cse,
        "6d6cc133c212bcd18b6da089c4fd2e715b842c261b667d0cce2f1ade4e752109",
    ),
    (
        Department::Ece,
        "38eebfc6666e6b725e9c70bb3e96b34345526b156df382e5289684ec65c9296a",
    ),
    (
        Department::Basic,
        "2fa96a650dc7a5548bae92b32470e79de5e6795f6246bd0eba2d2d7289c78f9e",
    ),
];

/// Resolves a department + shared security key to a session. The core trusts
/// the resulting session completely; there is no further authorization, no
/// lockout and no rate limiting.
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    pub fn login(
        &self,
        department: Department,
        security_key: &str,
        year: Option<AcademicYear>,
    ) -> AppResult<Session> {
        let expected = DEPARTMENT_KEY_DIGESTS
            .iter()
            .find(|(dept, _)| *dept == department)
            .map(|(_, digest)| *digest)
            .ok_or_else(|| AppError::other(format!("no security key for {department}")))?;

        if sha256_hex(security_key) != expected {
            return Err(AppError::auth_rejected(format!(
                "Invalid security key for {department}"
            )));
        }

        let session = if department == Department::Admin {
            Session {
                department,
                year: None,
            }
        } else {
            // Teachers always submit on behalf of a year; default to First.
            Session {
                department,
                year: Some(year.unwrap_or(AcademicYear::First)),
            }
        };

        info!(target: "app::auth", department = %department, "login accepted");
        Ok(session)
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}
