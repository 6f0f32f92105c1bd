//! Compute (Nova v2.1) extensions
//!
//! Resource paths are relative to the compute endpoint as published in
//! the catalog, which already carries the version and project.

pub mod networks;
pub mod reset_network;
pub mod usage;

pub use reset_network::reset_network;
