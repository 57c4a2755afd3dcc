//! Request extractors.
//!
//! - [`actor::Actor`] -- The acting user id set by the upstream auth layer.

pub mod actor;
