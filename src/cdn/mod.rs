//! CDN (Poppy v1)

pub mod service_assets;
