use std::env;

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Success,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemStatus {
    Migrated,
    Unchanged,
    Skipped,
    Failed,
    Info,
}

impl ItemStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ItemStatus::Migrated => "✓",
            ItemStatus::Unchanged => "➖",
            ItemStatus::Skipped => "⏭",
            ItemStatus::Failed => "⚠",
            ItemStatus::Info => "▸",
        }
    }
}

fn terminal_width() -> usize {
    env::var("TERM_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH)
}

pub fn box_top(width: usize) -> String {
    format!("╔{}╗", "═".repeat(width.saturating_sub(2)))
}

pub fn box_bottom(width: usize) -> String {
    format!("╚{}╝", "═".repeat(width.saturating_sub(2)))
}

pub fn box_row(content: &str, width: usize) -> String {
    let content_len = content.chars().count();
    let padding = width.saturating_sub(2).saturating_sub(content_len);
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!(
        "║{}{}{}║",
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad)
    )
}

pub fn render_box(title: &str, subtitle: &str, style: BoxStyle) {
    use colored::Colorize;

    let width = effective_width();
    let mut lines = vec![box_top(width), box_row(title, width)];
    if !subtitle.is_empty() {
        lines.push(box_row(subtitle, width));
    }
    lines.push(box_bottom(width));

    for line in lines {
        let styled = match style {
            BoxStyle::Info => line.bright_cyan().bold(),
            BoxStyle::Success => line.bright_green().bold(),
            BoxStyle::Warning => line.bright_yellow().bold(),
        };
        println!("  {}", styled);
    }
}

/// One progress line: icon then text, colored by status.
pub fn format_item(item: &str, status: ItemStatus) -> String {
    use colored::Colorize;

    let icon = status.icon();
    match status {
        ItemStatus::Migrated => format!("  {} {}", icon.bright_green(), item.bright_white()),
        ItemStatus::Unchanged => format!("  {} {}", icon.dimmed(), item.dimmed()),
        ItemStatus::Skipped | ItemStatus::Failed => {
            format!("  {} {}", icon.bright_yellow(), item.yellow())
        }
        ItemStatus::Info => format!("  {} {}", icon.bright_cyan(), item),
    }
}

pub fn print_item(item: &str, status: ItemStatus) {
    println!("{}", format_item(item, status));
}
