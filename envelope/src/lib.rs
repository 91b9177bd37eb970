//! # Cross-Binary Envelope
//!
//! This crate defines the wire contract for calls that cross the
//! agent/plugin binary boundary.
//!
//! ## Philosophy
//!
//! - **Self-describing**: every call names its target type, target id,
//!   method, and parameters in the envelope itself
//! - **Two-variant responses**: a response is either a success payload or a
//!   fault, never both, never neither
//! - **Opaque payloads**: parameter and result contents are passed through
//!   untouched; the codec validates only the envelope's own shape
//!
//! ## Architecture
//!
//! The envelope is a JSON document because the two sides run in separate
//! binaries and cannot share native call stacks. Requests are decoded into
//! [`CrossBinaryRequest`], responses are encoded from
//! [`CrossBinaryResponse`].

pub mod request;
pub mod response;
pub mod wire;

pub use request::CrossBinaryRequest;
pub use response::{CrossBinaryResponse, FaultDetail};

use thiserror::Error;

/// Errors raised by the envelope codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Input text does not parse as a valid request envelope.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Input text does not parse as a valid response envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
