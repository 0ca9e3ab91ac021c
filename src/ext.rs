//! Transport seam for attaching signed headers and bodies to outgoing requests.
//!
//! The signing core never performs I/O. [`RequestSignerExt`] lets callers plug in any HTTP client;
//! the `reqwest` feature ships [`ReqwestRequestSigner`] for the default stack.

pub mod request_signer;

pub use request_signer::*;
