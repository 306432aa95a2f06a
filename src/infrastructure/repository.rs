//! File system repository

use crate::domain::journey::{MarkdownNote, NoteResolver};
use crate::domain::NoteId;
use crate::error::{ReadjourError, Result};
use crate::infrastructure::config::{Config, CONFIG_DIR};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Abstract repository for note vault operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .readjour/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .readjour/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .readjour directory exists
    fn is_initialized(&self) -> bool;

    /// Create .readjour directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the vault root by walking up from current directory
    /// First checks READJOUR_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("READJOUR_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_config_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(ReadjourError::Config(format!(
                    "READJOUR_ROOT is set to '{}' but no .readjour directory found. \
                    Run 'readjour init' in that directory or unset READJOUR_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the vault root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_config_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(ReadjourError::NotReadjourDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_config_dir(path: &Path) -> bool {
        path.join(CONFIG_DIR).is_dir()
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let config_dir = self.root.join(CONFIG_DIR);

        if config_dir.exists() {
            return Err(ReadjourError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&config_dir)?;
        Ok(())
    }
}

// Note operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Read note content (returns empty string if file doesn't exist)
    pub fn read_note(&self, note: &NoteId) -> Result<String> {
        let path = self.root.join(note.as_str());

        if !path.exists() {
            return Ok(String::new());
        }

        fs::read_to_string(&path).map_err(ReadjourError::Io)
    }

    /// Load a note for extraction
    pub fn load_note(&self, note: &NoteId) -> Result<MarkdownNote> {
        Ok(MarkdownNote::new(note.clone(), self.read_note(note)?))
    }

    fn normalize_relative_path(path: &Path) -> Option<String> {
        let parts: Vec<&str> = path
            .iter()
            .map(|part| part.to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    /// All markdown notes below the root, sorted by path
    ///
    /// Hidden directories (such as `.readjour` or `.obsidian`) are skipped.
    pub fn list_notes(&self) -> Vec<NoteId> {
        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_dir() {
                return true;
            }
            !entry.file_name().to_string_lossy().starts_with('.')
        });

        let mut notes = Vec::new();
        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let Some(path) = Self::normalize_relative_path(rel) else {
                continue;
            };
            if path.ends_with(".md") {
                notes.push(NoteId::new(path));
            }
        }

        notes.sort();
        notes
    }
}

/// Resolves book references against the notes of a vault
///
/// Targets with a folder must match a note path; bare titles match file
/// names case-insensitively, preferring the referencing note's folder and
/// then the shortest path.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    notes: Vec<NoteId>,
}

impl VaultIndex {
    pub fn new(notes: Vec<NoteId>) -> Self {
        VaultIndex { notes }
    }

    fn folder(note: &NoteId) -> &str {
        note.as_str().rsplit_once('/').map_or("", |(folder, _)| folder)
    }
}

impl NoteResolver for VaultIndex {
    fn resolve(&self, target: &str, source: &NoteId) -> Option<NoteId> {
        let target = target.trim().trim_start_matches("./");
        if target.is_empty() {
            return None;
        }

        if target.contains('/') {
            let with_extension = if target.ends_with(".md") {
                target.to_string()
            } else {
                format!("{}.md", target)
            };
            return self
                .notes
                .iter()
                .find(|note| note.as_str() == with_extension)
                .cloned();
        }

        let title = target.strip_suffix(".md").unwrap_or(target);
        let source_folder = Self::folder(source);
        self.notes
            .iter()
            .filter(|note| note.title().eq_ignore_ascii_case(title))
            .min_by_key(|note| (Self::folder(note) != source_folder, note.as_str().len()))
            .cloned()
    }
}
