//! Ghaymah Cloud command line client.
//!
//! The binary is a thin shell over [`api::GhaymahApi`]; everything it needs to
//! talk to the control plane lives in this library so it can be exercised from
//! tests without spawning the process.

pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
pub mod token;
pub mod types;
