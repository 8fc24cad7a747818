use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Gravatar URL for `email`: 200px, PG rated, "mystery person" fallback.
pub(crate) fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{GRAVATAR_BASE}/{}?s=200&r=pg&d=mm", hex::encode(digest))
}
