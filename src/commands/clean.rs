//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::store::STORE_FILE;
use crate::Site;

/// Clean the public directory and the local preference store
pub fn run(site: &Site) -> Result<()> {
    if site.public_dir.exists() {
        fs::remove_dir_all(&site.public_dir)?;
        tracing::info!("Deleted: {:?}", site.public_dir);
    }

    let store_path = site.base_dir.join(STORE_FILE);
    if store_path.exists() {
        fs::remove_file(&store_path)?;
        tracing::info!("Deleted: {:?}", store_path);
    }

    Ok(())
}
