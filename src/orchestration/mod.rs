//! Orchestration (Heat v1)

pub mod build_info;

#[cfg(test)]
mod tests;
