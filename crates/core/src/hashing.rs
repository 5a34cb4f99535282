//! Order-sensitive SHA-256 digest over string parts.
//!
//! Used by [`Alert::dedup_id`](crate::alert::Alert::dedup_id) and
//! [`Alert::unique_id`](crate::alert::Alert::unique_id) to derive stable
//! identities from ordered field lists.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest over an ordered list of strings.
///
/// Every part is prefixed with its byte length, so `["ab", "c"]` and
/// `["a", "bc"]` hash differently and the order of parts matters.
pub fn hash_parts<S: AsRef<str>>(parts: &[S]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        let bytes = part.as_ref().as_bytes();
        hasher.update((bytes.len() as u64).to_be_bytes());
        hasher.update(bytes);
    }
    format!("{:x}", hasher.finalize())
}
