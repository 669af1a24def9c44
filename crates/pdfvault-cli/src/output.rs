//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use pdfvault_core::AppError;
use pdfvault_core::types::{PageMarker, PageWindow, Pagination};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => print_json(item),
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print the page line under a table.
pub fn print_page_footer(pagination: &Pagination, window: &PageWindow) {
    if window.is_paged() {
        println!("{}", render_page_window(window));
    }
    println!(
        "Page {} of {} ({} total)",
        pagination.current_page,
        pagination.total_pages.max(1),
        pagination.total_count
    );
}

/// Render page buttons as `« 1 … 5 6 [7] 8 9 10 »`.
pub fn render_page_window(window: &PageWindow) -> String {
    let mut parts = vec!["«".to_string()];
    parts.extend(window.pages.iter().map(|marker| match marker {
        PageMarker::Page(page) if *page == window.current_page => format!("[{page}]"),
        PageMarker::Page(page) => page.to_string(),
        PageMarker::Ellipsis => "…".to_string(),
    }));
    parts.push("»".to_string());
    parts.join(" ")
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Follow-up advice printed under a failed command's error.
pub fn error_hint(err: &AppError) -> Option<&'static str> {
    if err.is_authentication() {
        Some("Run `pdfvault-admin login` to start a new session.")
    } else {
        None
    }
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

/// `-` for missing values in table cells.
pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
