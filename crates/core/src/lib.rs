//! Domain types shared by the tasktrack crates.
//!
//! Nothing in here touches the database or HTTP; the `db` and `api` crates
//! build on these definitions.

pub mod error;
pub mod pagination;
pub mod task;
pub mod types;
