//! A synchronous STUN/TURN protocol runtime: wire codec, a retransmitting
//! transaction manager and a filter-based socket demultiplexer, meant to
//! be embedded as a building block for ICE-style NAT traversal rather
//! than run as a standalone server.

#[macro_use]
extern crate num_derive;

pub mod attribute;
pub mod channel_data;
pub mod config;
pub mod credentials;
pub mod definitions;
pub mod demux;
pub mod error;
pub mod filter;
pub mod header;
pub mod message;
pub mod transaction;
pub mod transport;
pub mod utils;

pub use attribute::{AttributeDecodeError, AttributeEncodeError, StunAttribute};
pub use error::StunCoreError;
pub use header::{HeaderDecodeError, HeaderEncodeError, StunHeader, StunMessageClass, StunMessageMethod};
pub use message::{
    IntegrityKeyGenerationError, IntegrityStatus, MessageDecodeError, MessageEncodeError,
    StunMessage,
};
