//! End-to-end tests of the operation layer over the in-memory handler.

pub mod server_lifecycle;
