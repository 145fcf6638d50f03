//! Shared server state.
//!
//! The [`Registry`] is the single authority over connections, nicknames and
//! channels; everything else holds [`ConnId`] handles into it.

mod conn;
mod registry;

pub use conn::ConnId;
pub use registry::{JoinOutcome, Registry, RegistryError, SetNick};
