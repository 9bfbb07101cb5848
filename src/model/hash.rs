//! Plan fingerprinting.
//!
//! A fingerprint identifies the set of proposed changes independently of
//! the order in which the ingestion layer listed them, so two reports for
//! the same plan carry the same identifier.

use sha2::{Digest, Sha256};

use super::change::{OutputChange, ResourceChange};

/// Hasher for computing plan fingerprints.
#[derive(Debug, Default)]
pub struct PlanHasher;

impl PlanHasher {
    /// Creates a new plan hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a fingerprint over every resource and output change.
    #[must_use]
    pub fn fingerprint(&self, resources: &[ResourceChange], outputs: &[OutputChange]) -> String {
        let mut hasher = Sha256::new();

        // Resources (sorted by address for determinism)
        let mut resource_hashes: Vec<(&str, String)> = resources
            .iter()
            .map(|r| (r.address.as_str(), self.hash_resource(r)))
            .collect();
        resource_hashes.sort_by(|a, b| a.0.cmp(b.0));
        for (_, hash) in resource_hashes {
            hasher.update(hash.as_bytes());
        }

        // Section separator
        hasher.update([0u8]);

        // Outputs (sorted by name for determinism)
        let mut sorted_outputs: Vec<&OutputChange> = outputs.iter().collect();
        sorted_outputs.sort_by(|a, b| a.name.cmp(&b.name));
        for output in sorted_outputs {
            hasher.update(output.name.as_bytes());
            hasher.update(output.action.label().as_bytes());
            hasher.update(if output.sensitive { [1u8] } else { [0u8] });
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a hash for a single resource change.
    #[must_use]
    pub fn hash_resource(&self, change: &ResourceChange) -> String {
        let mut hasher = Sha256::new();

        hasher.update(change.address.as_bytes());
        hasher.update(change.action.label().as_bytes());

        // BTreeSet iteration is already ordered
        for path in &change.replace_paths {
            hasher.update(path.as_str().as_bytes());
        }

        if let Some(after) = &change.after {
            hasher.update(after.to_string().as_bytes());
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a short fingerprint (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }
}
