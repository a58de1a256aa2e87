mod decode;
mod encode;
mod errors;
mod message;
mod private_utils;
mod utils;

pub use decode::IntegrityStatus;
pub use errors::{IntegrityKeyGenerationError, MessageDecodeError, MessageEncodeError};
pub use message::StunMessage;

use crate::credentials::CredentialsStore;

/// Where a single decode/encode call derives its MESSAGE-INTEGRITY key
/// material from: a fixed password (the original codec entry points) or
/// a [`CredentialsStore`] consulted by username.
pub(super) enum IntegritySource<'a> {
    Password(Option<&'a str>),
    Store(&'a dyn CredentialsStore),
}
