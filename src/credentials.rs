//! The credentials collaborator consumed by the message codec when
//! validating or generating MESSAGE-INTEGRITY.
//!
//! The codec never stores passwords or authenticates users itself; it
//! asks a [`CredentialsStore`] for the key material and trusts the
//! store's judgment on whether a username is known.

/// Outcome of a key lookup: either the short/long-term key bytes, or a
/// signal that the username is not known to this store.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyLookup {
    /// The key to use for HMAC-SHA1, already SASLprep'd/hashed as
    /// appropriate for the credential mechanism in use.
    Key(Vec<u8>),
    /// The store has no record of this username; MESSAGE-INTEGRITY
    /// validation should be skipped and the message flagged rather than
    /// treated as an integrity failure.
    NotKnown,
}

/// Collaborator interface for MESSAGE-INTEGRITY key derivation and
/// username checks. Implementations decide short-term vs. long-term
/// credential mechanics; the codec only calls through this trait.
pub trait CredentialsStore: Send + Sync {
    /// Returns the HMAC key for `username`, or [`KeyLookup::NotKnown`] if
    /// the store doesn't recognize it. An empty key signals "no
    /// password" rather than "unknown".
    fn get_key(&self, username: &str) -> KeyLookup;

    /// Whether `username` is recognized at all.
    fn check_username(&self, username: &str) -> bool;
}

/// A [`CredentialsStore`] backed by a single static short-term
/// username/password pair, the common case for a STUN client talking to
/// one server.
pub struct StaticCredentials {
    username: String,
    key: Vec<u8>,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl AsRef<str>) -> Self {
        Self {
            username: username.into(),
            key: password.as_ref().as_bytes().to_vec(),
        }
    }
}

impl CredentialsStore for StaticCredentials {
    fn get_key(&self, username: &str) -> KeyLookup {
        if username == self.username {
            KeyLookup::Key(self.key.clone())
        } else {
            KeyLookup::NotKnown
        }
    }

    fn check_username(&self, username: &str) -> bool {
        username == self.username
    }
}

/// A [`CredentialsStore`] keyed by `(username, media_tag)` for TURN's
/// long-term credential mechanism, where a single user may hold distinct
/// keys per allocation/media context.
pub trait LongTermCredentialsStore: Send + Sync {
    /// Per-media key lookup: `media_tag` is an opaque caller-defined
    /// discriminator (e.g. an allocation id).
    fn get_key_for_media(&self, username: &str, media_tag: &str) -> KeyLookup;
}
