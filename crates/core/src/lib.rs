//! Domain types shared by the persistence layer and the HTTP surface.

pub mod clock;
pub mod error;
pub mod paging;
pub mod types;
