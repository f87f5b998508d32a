//! Common functions used across test cases.

pub mod deployment;
pub mod requests;
pub mod router;
