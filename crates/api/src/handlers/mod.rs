//! Request handlers, one submodule per resource.

pub mod auth;
pub mod tasks;
