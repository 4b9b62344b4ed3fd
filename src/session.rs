// src/session.rs

//! Session-scoped credential gate.
//!
//! This is client-side obfuscation only, NOT access control: the gate
//! compares a digest of the entered credential pair against one fixed
//! reference digest baked into the deployment. Anyone with the binary or the
//! persisted data can bypass it. It exists to keep the editing surface out of
//! casual reach, and nothing in this crate treats it as a security boundary.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::hash::sha256_hex;

/// Process-scoped boolean gate derived from one reference credential digest.
///
/// The flag lives only in memory and is never persisted.
pub struct SessionGate {
    reference_digest: String,
    authenticated: AtomicBool,
}

impl SessionGate {
    /// Creates a gate against a hex-encoded SHA-256 reference digest of
    /// `"<username>:<password>"`.
    pub fn new(reference_digest: impl Into<String>) -> Self {
        Self {
            reference_digest: reference_digest.into().to_lowercase(),
            authenticated: AtomicBool::new(false),
        }
    }

    /// Computes the digest a reference value must carry for the given pair.
    pub fn digest_for(username: &str, password: &str) -> String {
        sha256_hex(format!("{}:{}", username, password).as_bytes())
    }

    /// Compares the credential pair against the reference digest and sets the
    /// session flag on a match. Returns whether the session is now open.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let matched = Self::digest_for(username, password) == self.reference_digest;
        if matched {
            self.authenticated.store(true, Ordering::SeqCst);
        }
        matched
    }

    /// Whether this session has passed the gate.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// Closes the session.
    pub fn sign_out(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opens_on_matching_pair() {
        let gate = SessionGate::new(SessionGate::digest_for("editor", "hunter2"));
        assert!(!gate.is_authenticated());

        assert!(gate.authenticate("editor", "hunter2"));
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_wrong_pair_leaves_gate_closed() {
        let gate = SessionGate::new(SessionGate::digest_for("editor", "hunter2"));
        assert!(!gate.authenticate("editor", "wrong"));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_sign_out() {
        let gate = SessionGate::new(SessionGate::digest_for("editor", "hunter2"));
        gate.authenticate("editor", "hunter2");
        gate.sign_out();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_reference_digest_is_case_insensitive() {
        let gate = SessionGate::new(SessionGate::digest_for("editor", "hunter2").to_uppercase());
        assert!(gate.authenticate("editor", "hunter2"));
    }
}
