//! Domain core for the gym and store management backend.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, the
//! ownership-guarded mutation routines, and the services built on them;
//! [`domain::ports`] defines the driven ports (entity store, identity
//! context) that adapters implement. Inbound transports and durable
//! storage live outside this crate.

pub mod domain;

#[cfg(feature = "test-support")]
pub mod test_support;
