//! Configuration management

use crate::domain::date_format::DEFAULT_DATE_FORMAT;
use crate::domain::pattern::{LogFamily, PatternSet, PatternSetBuild, TemplateAction, TemplateKind};
use crate::domain::DateFormat;
use crate::error::{ReadjourError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_DIR: &str = ".readjour";
pub const CONFIG_FILE: &str = "config.toml";

/// One optional template per action; blank or missing ones are not used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abandoned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_progress: Option<String>,
}

impl TemplateConfig {
    pub fn get(&self, action: TemplateAction) -> Option<&str> {
        match action {
            TemplateAction::Started => self.started.as_deref(),
            TemplateAction::Finished => self.finished.as_deref(),
            TemplateAction::Abandoned => self.abandoned.as_deref(),
            TemplateAction::Progress => self.progress.as_deref(),
            TemplateAction::RelativeProgress => self.relative_progress.as_deref(),
        }
    }

    pub fn set(&mut self, action: TemplateAction, template: Option<String>) {
        let slot = match action {
            TemplateAction::Started => &mut self.started,
            TemplateAction::Finished => &mut self.finished,
            TemplateAction::Abandoned => &mut self.abandoned,
            TemplateAction::Progress => &mut self.progress,
            TemplateAction::RelativeProgress => &mut self.relative_progress,
        };
        *slot = template;
    }

    /// Compile every configured template, in action order
    pub fn build(&self, family: LogFamily, date_format: DateFormat) -> PatternSetBuild {
        TemplateAction::ALL
            .iter()
            .fold(PatternSet::builder(date_format), |builder, action| {
                builder.register_optional(TemplateKind::new(family, *action), self.get(*action))
            })
            .build()
    }

    fn daily_defaults() -> Self {
        TemplateConfig {
            started: Some("Started {book}".to_string()),
            finished: Some("Finished {book}".to_string()),
            abandoned: Some("Abandoned {book}".to_string()),
            progress: Some("Read {book}: {endPage}".to_string()),
            relative_progress: Some("Read {book}: {end}%".to_string()),
        }
    }

    fn book_defaults() -> Self {
        TemplateConfig {
            started: Some("{date}: Started".to_string()),
            finished: Some("{date}: Finished".to_string()),
            abandoned: Some("{date}: Abandoned".to_string()),
            progress: Some("{date}: {endPage}".to_string()),
            relative_progress: Some("{date}: {end}%".to_string()),
        }
    }
}

/// Daily notes: one note per day, reading lines name the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyConfig {
    /// Only notes whose path starts with this folder are daily notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_daily_heading")]
    pub heading: String,
    #[serde(default = "TemplateConfig::daily_defaults")]
    pub templates: TemplateConfig,
}

impl Default for DailyConfig {
    fn default() -> Self {
        DailyConfig {
            folder: None,
            date_format: default_date_format(),
            heading: default_daily_heading(),
            templates: TemplateConfig::daily_defaults(),
        }
    }
}

/// Book notes: a reading log kept inside the book's own note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_books_heading")]
    pub heading: String,
    #[serde(default = "TemplateConfig::book_defaults")]
    pub templates: TemplateConfig,
}

impl Default for BooksConfig {
    fn default() -> Self {
        BooksConfig {
            date_format: default_date_format(),
            heading: default_books_heading(),
            templates: TemplateConfig::book_defaults(),
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_daily_heading() -> String {
    "Reading".to_string()
}

fn default_books_heading() -> String {
    "Reading Log".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub daily: DailyConfig,
    #[serde(default)]
    pub books: BooksConfig,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            created: Utc::now(),
            daily: DailyConfig::default(),
            books: BooksConfig::default(),
        }
    }

    /// Load config from .readjour/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReadjourError::NotReadjourDirectory(path.to_path_buf())
            } else {
                ReadjourError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| ReadjourError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .readjour/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_dir = path.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        if !config_dir.exists() {
            fs::create_dir(&config_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ReadjourError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Date format of daily note paths
    pub fn daily_date_format(&self) -> Result<DateFormat> {
        DateFormat::new(&self.daily.date_format)
    }

    /// Date format of inline dates in book logs
    pub fn books_date_format(&self) -> Result<DateFormat> {
        DateFormat::new(&self.books.date_format)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config_defaults() {
        let config = Config::new();
        assert_eq!(config.daily.heading, "Reading");
        assert_eq!(config.daily.date_format, "YYYY-MM-DD");
        assert_eq!(config.daily.folder, None);
        assert_eq!(config.books.heading, "Reading Log");
        assert_eq!(
            config.daily.templates.get(TemplateAction::Started),
            Some("Started {book}")
        );
        assert_eq!(
            config.books.templates.get(TemplateAction::Progress),
            Some("{date}: {endPage}")
        );
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.daily.folder = Some("Daily Notes".to_string());
        config
            .books
            .templates
            .set(TemplateAction::RelativeProgress, None);

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".readjour").exists());
        assert!(temp.path().join(".readjour/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.created, config.created);
        assert_eq!(loaded.daily, config.daily);
        assert_eq!(loaded.books.templates.relative_progress, None);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".readjour")).unwrap();
        fs::write(
            temp.path().join(".readjour/config.toml"),
            "created = \"2025-01-01T00:00:00Z\"\n\n[daily]\nfolder = \"Journal\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.daily.folder.as_deref(), Some("Journal"));
        assert_eq!(loaded.daily.heading, "Reading");
        assert_eq!(loaded.daily.templates, TemplateConfig::daily_defaults());
        assert_eq!(loaded.books, BooksConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            ReadjourError::NotReadjourDirectory(_) => {}
            other => panic!("Expected NotReadjourDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".readjour")).unwrap();
        fs::write(temp.path().join(".readjour/config.toml"), "created = 12").unwrap();

        let err = Config::load_from_dir(temp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config.toml"));
    }

    #[test]
    fn test_template_config_build() {
        let mut templates = TemplateConfig::daily_defaults();
        templates.set(TemplateAction::Abandoned, Some("Dropped".to_string()));

        let build = templates.build(LogFamily::DayLog, DateFormat::default());
        assert!(build.has_compile_errors());
        assert_eq!(build.errors.len(), 1);
        assert_eq!(build.patterns.len(), 4);

        let kinds: Vec<TemplateAction> = build
            .patterns
            .patterns()
            .iter()
            .map(|p| p.kind().action)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TemplateAction::Started,
                TemplateAction::Finished,
                TemplateAction::Progress,
                TemplateAction::RelativeProgress,
            ]
        );
    }

    #[test]
    fn test_date_formats() {
        let mut config = Config::new();
        assert!(config.daily_date_format().is_ok());
        config.books.date_format = "YYYY".to_string();
        assert!(matches!(
            config.books_date_format(),
            Err(ReadjourError::InvalidDateFormat(_))
        ));
    }
}
