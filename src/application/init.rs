//! Initialize vault use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::fs;
use std::path::Path;

pub struct InitService;

impl InitService {
    /// Initialize a readjour vault at the specified path.
    pub fn execute(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let repo = FileSystemRepository::new(path.to_path_buf());
        repo.initialize()?;
        repo.save_config(&Config::new())?;

        tracing::info!(root = %path.display(), "Initialized readjour vault");
        println!("Initialized readjour at {}", path.display());

        Ok(())
    }
}
