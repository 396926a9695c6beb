//! Output formatting for CLI display.

use crate::calendar::DayKey;
use crate::model::{CalendarEvent, NoteType};

/// One-character marker for compact month views.
pub(super) fn note_marker(note: NoteType) -> char {
    match note {
        NoteType::Green => '+',
        NoteType::Yellow => '~',
        NoteType::Red => '!',
    }
}

/// Format one event as a detail line for `day` output.
pub(super) fn format_event(event: &CalendarEvent) -> String {
    let note = event.note_type();
    let mut line = format!(
        "{} {} [{}]  {}",
        note_marker(note),
        event.platform,
        note.label(),
        event.status,
    );
    if let Some(time) = &event.scheduled_time {
        line.push_str(&format!("  @ {time}"));
    }
    match &event.content {
        Some(content) if !content.is_empty() => {
            line.push_str(&format!("\n    {}", summarize(content)));
        }
        _ => line.push_str("\n    (no content yet)"),
    }
    line
}

/// Format one calendar day as a single month-view row.
///
/// Empty days still render; a calendar query never has a failure state
/// to display.
pub(super) fn format_month_row(key: DayKey, events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return format!("  {:>2}  -", key.day);
    }
    let cells: Vec<String> = events
        .iter()
        .map(|e| format!("{}{}", note_marker(e.note_type()), e.platform.id()))
        .collect();
    format!("  {:>2}  {}", key.day, cells.join("  "))
}

/// First line of the content, truncated for display.
fn summarize(content: &str) -> String {
    const MAX: usize = 60;
    let first_line = content.lines().next().unwrap_or("");
    let mut summary: String = first_line.chars().take(MAX).collect();
    if first_line.chars().count() > MAX || content.lines().count() > 1 {
        summary.push('…');
    }
    summary
}
