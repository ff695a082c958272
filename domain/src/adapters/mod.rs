//! Test-only adapters that live inside the domain crate for convenience.
//!
//! These are intended purely for unit testing and local demos. The real
//! network transport lives in the `http-client` crate.

pub mod memory;
