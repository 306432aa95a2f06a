//! Output formatting utilities

use crate::domain::pattern::TemplateFailure;
use crate::domain::JourneyEvent;

/// Format journey events for display
pub fn format_journey_list(events: &[JourneyEvent]) -> String {
    if events.is_empty() {
        return "No reading journeys found".to_string();
    }

    let mut output = String::new();
    for event in events {
        output.push_str(&format!(
            "{}  {}  {}\n",
            event.date.format("%d-%m-%Y"),
            event.action,
            event.book
        ));
    }
    output
}

/// Format templates that failed to compile
pub fn format_template_failures(failures: &[TemplateFailure]) -> String {
    let mut output = String::new();
    for failure in failures {
        output.push_str(&format!("{}: {}\n", failure.kind, failure.error));
    }
    output
}
