//! Networking (Neutron v2)
//!
//! Resource paths are relative to the `v2.0/` base of the network endpoint.

pub mod ip_availability;
pub mod l7policies;

#[cfg(test)]
mod tests;
