//! Object storage (Swift v1)
//!
//! The object storage endpoint already names the account
//! (`.../v1/AUTH_<project>`); resource paths are container names below it.

pub mod containers;
