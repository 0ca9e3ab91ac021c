//! Partner identities, roles, and redacted secret wrappers.

pub mod id;
pub mod identity;
pub mod role;
pub mod secret;

pub use id::*;
pub use identity::*;
pub use role::*;
pub use secret::*;
