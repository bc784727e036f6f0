//! Core modules for svc's service state model and control protocol.
//!
//! Everything that touches a supervision directory lives here. The CLI
//! layer in `dispatch` only composes these.

pub mod array;
pub mod config;
pub mod control;
pub mod dirfd;
pub mod error;
pub mod output;
pub mod registry;
pub mod scan;
pub mod service;
pub mod snapshot;
