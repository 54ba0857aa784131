//! Plain-text rendering of the visible page and the selection.

use catalog_core::{LoadState, PageView, SelectionSet};
use shared::domain::Artwork;

const TEXT_HEADERS: [&str; 4] = ["Title", "Place of Origin", "Artist", "Inscriptions"];
const ID_WIDTH: usize = 8;
const DATE_WIDTH: usize = 10;

pub fn render_page(view: &PageView<'_>, is_selected: impl Fn(&Artwork) -> bool, width: usize) -> String {
    let width = width.max(4);
    let mut out = String::new();

    let mut header = format!("    {:<ID_WIDTH$}", "ID");
    for title in TEXT_HEADERS {
        header.push(' ');
        header.push_str(&fit(title, width));
    }
    header.push_str(&format!(" {:>DATE_WIDTH$} {:>DATE_WIDTH$}", "Start Date", "End Date"));
    out.push_str(header.trim_end());
    out.push('\n');

    if view.records.is_empty() {
        out.push_str("    (no records)\n");
    }

    for record in view.records {
        let mark = if is_selected(record) { "[x]" } else { "[ ]" };
        let mut row = format!("{mark} {:<ID_WIDTH$}", record.id.0);
        for text in [
            &record.title,
            &record.place_of_origin,
            &record.artist_display,
            &record.inscriptions,
        ] {
            row.push(' ');
            row.push_str(&fit(text, width));
        }
        row.push_str(&format!(
            " {:>DATE_WIDTH$} {:>DATE_WIDTH$}",
            record.date_start, record.date_end
        ));
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push_str(&status_line(view));
    out
}

pub fn status_line(view: &PageView<'_>) -> String {
    let mut line = if view.total_pages == 0 {
        "page -".to_string()
    } else {
        format!("page {} of {}", view.current_page, view.total_pages)
    };

    if let Some(pending) = view.pending_page {
        line.push_str(&format!(" | loading page {pending}..."));
    }
    if view.state == LoadState::Error {
        if let Some(error) = view.error {
            line.push_str(&format!(" | error: {error}"));
            if error.is_retryable() {
                line.push_str(" (r to retry)");
            }
        }
    }
    if let Some(fetched_at) = view.fetched_at {
        line.push_str(&format!(" | fetched {}", fetched_at.format("%H:%M:%S UTC")));
    }
    line
}

pub fn render_selection(selection: &SelectionSet) -> String {
    if selection.is_empty() {
        return "nothing selected".to_string();
    }

    let mut out = format!("{} selected", selection.len());
    for record in selection.all() {
        out.push_str(&format!("\n  #{} {}", record.id, single_line(&record.title)));
        if !record.artist_display.is_empty() {
            out.push_str(&format!(" ({})", single_line(&record.artist_display)));
        }
    }
    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to `width` characters and pads with spaces.
fn fit(text: &str, width: usize) -> String {
    let text = single_line(text);
    if text.chars().count() > width {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        format!("{text:<width$}")
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
