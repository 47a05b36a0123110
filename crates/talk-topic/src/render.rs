//! Plain-text rendering of the flat view and of edit scripts.

use talk_thread::{FlatThreadItem, RangeOp};

/// One line per visible row: position, indent, indicator, author, id.
pub fn render_view(rows: &[FlatThreadItem]) -> String {
    rows.iter()
        .enumerate()
        .map(|(position, row)| {
            let author = if row.item.author.is_empty() {
                "(unknown)"
            } else {
                row.item.author.as_str()
            };
            let replies = if row.has_replies() && !row.is_expanded {
                format!(" +{}", row.reply_count())
            } else {
                String::new()
            };
            format!(
                "{:>3} {}{}{} [{}]{}",
                position,
                row.indent(),
                row.indicator(),
                author,
                row.id(),
                replies
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summarize row updates, e.g. `+2 @1` / `-3 @1`.
pub fn render_ranges(ranges: &[RangeOp]) -> String {
    if ranges.is_empty() {
        return "no visible change".to_string();
    }
    ranges
        .iter()
        .map(|range| match range {
            RangeOp::Inserted { start, count } => format!("+{} @{}", count, start),
            RangeOp::Removed { start, count } => format!("-{} @{}", count, start),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
