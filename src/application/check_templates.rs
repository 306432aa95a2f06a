//! Template check use case

use crate::domain::pattern::{LogFamily, TemplateFailure};
use crate::error::Result;
use crate::infrastructure::repository::JournalRepository;
use crate::infrastructure::FileSystemRepository;

/// Outcome of compiling every configured template
#[derive(Debug)]
pub struct TemplateCheck {
    pub compiled: usize,
    pub failures: Vec<TemplateFailure>,
}

impl TemplateCheck {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct CheckTemplatesService {
    repository: FileSystemRepository,
}

impl CheckTemplatesService {
    pub fn new(repository: FileSystemRepository) -> Self {
        CheckTemplatesService { repository }
    }

    /// Compile the daily and book templates; date formats must be valid
    pub fn execute(&self) -> Result<TemplateCheck> {
        let config = self.repository.load_config()?;

        let daily = config
            .daily
            .templates
            .build(LogFamily::DayLog, config.daily_date_format()?);
        let books = config
            .books
            .templates
            .build(LogFamily::BookLog, config.books_date_format()?);

        let mut failures = daily.errors;
        failures.extend(books.errors);

        Ok(TemplateCheck {
            compiled: daily.patterns.len() + books.patterns.len(),
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pattern::TemplateAction;
    use crate::error::ReadjourError;
    use crate::infrastructure::Config;
    use tempfile::TempDir;

    fn service_with(config: &Config) -> (TempDir, CheckTemplatesService) {
        let temp = TempDir::new().unwrap();
        config.save_to_dir(temp.path()).unwrap();
        let service =
            CheckTemplatesService::new(FileSystemRepository::new(temp.path().to_path_buf()));
        (temp, service)
    }

    #[test]
    fn test_default_templates_compile() {
        let (_temp, service) = service_with(&Config::new());
        let check = service.execute().unwrap();
        assert!(check.is_ok());
        assert_eq!(check.compiled, 10);
    }

    #[test]
    fn test_failures_are_collected() {
        let mut config = Config::new();
        config
            .books
            .templates
            .set(TemplateAction::Progress, Some("{date}: {endPage}/{endPage}".to_string()));
        config.daily.templates.set(TemplateAction::Started, None);

        let (_temp, service) = service_with(&config);
        let check = service.execute().unwrap();
        assert_eq!(check.compiled, 8);
        assert_eq!(check.failures.len(), 1);
        assert!(matches!(
            check.failures[0].error,
            ReadjourError::DuplicatePlaceholder { .. }
        ));
        assert_eq!(check.failures[0].kind.to_string(), "book log progress");
    }

    #[test]
    fn test_invalid_date_format_is_an_error() {
        let mut config = Config::new();
        config.daily.date_format = "MM-DD".to_string();

        let (_temp, service) = service_with(&config);
        assert!(matches!(
            service.execute(),
            Err(ReadjourError::InvalidDateFormat(_))
        ));
    }
}
