//! Dashboard analytics command.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use pdfvault_core::AppResult;

use crate::context::CliContext;
use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct TopPdfRow {
    title: String,
    department: String,
    year: String,
    views: u64,
}

#[derive(Debug, Serialize, Tabled)]
struct UploaderRow {
    name: String,
    pdfs: u64,
    views: u64,
}

/// Print the analytics overview.
pub async fn execute(ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    let (analytics, highlights) = ctx.analytics().fetch().await?;
    if format == OutputFormat::Json {
        output::print_json(&json!({ "analytics": analytics, "highlights": highlights }));
        return Ok(());
    }

    let overview = &analytics.overview;
    println!("Overview");
    output::print_kv("Users", &overview.total_users.to_string());
    output::print_kv(
        "PDFs",
        &format!(
            "{} ({} active, {}%)",
            overview.total_pdfs, overview.active_pdfs, highlights.active_share
        ),
    );
    output::print_kv("Uploads (7 days)", &overview.recent_uploads.to_string());
    output::print_kv(
        "Views",
        &format!(
            "{} ({} per PDF)",
            overview.total_views, highlights.average_views
        ),
    );
    output::print_kv("Folders", &overview.total_folders.to_string());
    output::print_kv("Top department", &output::or_dash(highlights.top_department.as_deref()));
    output::print_kv("Top year", &output::or_dash(highlights.top_year.as_deref()));

    println!("\nBy department");
    for bucket in &analytics.distribution.by_department {
        output::print_kv(&bucket.label(), &bucket.count.to_string());
    }

    println!("\nMost viewed");
    let rows: Vec<TopPdfRow> = analytics
        .top_pdfs
        .iter()
        .map(|p| TopPdfRow {
            title: p.title.clone(),
            department: output::or_dash(p.department.as_deref()),
            year: output::or_dash(p.year),
            views: p.view_count,
        })
        .collect();
    output::print_list(&rows, format);

    println!("\nTop uploaders");
    let rows: Vec<UploaderRow> = analytics
        .top_uploaders
        .iter()
        .map(|u| UploaderRow {
            name: u.name.clone(),
            pdfs: u.pdf_count,
            views: u.total_views,
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
