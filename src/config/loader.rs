//! `clouds.yaml` discovery and parsing

use super::types::{CloudConfig, CloudsFile};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const FILE_NAME: &str = "clouds.yaml";

/// Candidate locations in search order: the explicit path, the working
/// directory, then `$HOME/.config/openstack/`
pub fn search_paths(explicit: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    paths.push(PathBuf::from(FILE_NAME));
    if let Some(home) = home {
        paths.push(home.join(".config").join("openstack").join(FILE_NAME));
    }
    paths
}

/// First existing `clouds.yaml`.
///
/// An explicit path that does not exist is an error rather than a reason to
/// keep searching.
pub fn find_clouds_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
    }

    let home = std::env::var_os("HOME").map(PathBuf::from);
    Ok(search_paths(explicit, home.as_deref())
        .into_iter()
        .find(|path| path.is_file()))
}

/// Parse `clouds.yaml` content
pub fn load_clouds_from_str(yaml: &str) -> Result<CloudsFile> {
    serde_yaml::from_str(yaml).map_err(|e| Error::config(format!("Failed to parse clouds YAML: {e}")))
}

/// Read and parse a `clouds.yaml` file
pub fn load_clouds_file(path: &Path) -> Result<CloudsFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read clouds file '{}': {}", path.display(), e))
    })?;
    load_clouds_from_str(&content)
}

/// Resolve a named cloud.
///
/// Reads the first `clouds.yaml` found, then overlays `OS_*` environment
/// variables. Without a file, the cloud is built from the environment
/// alone.
pub fn load_cloud(name: &str, explicit: Option<&Path>) -> Result<CloudConfig> {
    let mut cloud = match find_clouds_file(explicit)? {
        Some(path) => {
            debug!("Loading cloud '{}' from {}", name, path.display());
            load_clouds_file(&path)?.cloud(name)?
        }
        None => {
            debug!("No {} found, using environment only", FILE_NAME);
            CloudConfig::default()
        }
    };

    cloud.apply_env(|key| std::env::var(key).ok())?;
    Ok(cloud)
}
