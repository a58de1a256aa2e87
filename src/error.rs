use thiserror::Error;

use crate::demux::DemuxError;
use crate::header::{HeaderDecodeError, HeaderEncodeError};
use crate::message::{MessageDecodeError, MessageEncodeError};
use crate::transaction::TransactionError;
use crate::AttributeDecodeError;
use crate::AttributeEncodeError;

/// Crate-wide error wrapper for callers that want one type at the API
/// boundary instead of threading each subsystem's own error through.
/// Asynchronous outcomes (timeout, failure events) still flow through
/// the listener interface; this is only for the synchronous call paths
/// (`encode`/`decode`/`send_request`).
#[derive(Error, Debug)]
pub enum StunCoreError {
    #[error(transparent)]
    HeaderDecode(#[from] HeaderDecodeError),
    #[error(transparent)]
    HeaderEncode(#[from] HeaderEncodeError),
    #[error(transparent)]
    AttributeDecode(#[from] AttributeDecodeError),
    #[error(transparent)]
    AttributeEncode(#[from] AttributeEncodeError),
    #[error(transparent)]
    MessageDecode(#[from] MessageDecodeError),
    #[error(transparent)]
    MessageEncode(#[from] MessageEncodeError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Demux(#[from] DemuxError),
}
