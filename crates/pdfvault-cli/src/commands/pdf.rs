//! PDF CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use pdfvault_core::AppResult;
use pdfvault_entity::pdf::{Pdf, PdfFilter, UpdatePdf};

use crate::context::CliContext;
use crate::output::{self, OutputFormat};

/// Arguments for PDF commands
#[derive(Debug, Args)]
pub struct PdfArgs {
    /// PDF subcommand
    #[command(subcommand)]
    pub command: PdfCommand,
}

/// PDF subcommands
#[derive(Debug, Subcommand)]
pub enum PdfCommand {
    /// List PDFs
    List {
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u64,
        /// Search title, description and subject
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by department
        #[arg(short, long)]
        department: Option<String>,
        /// Filter by study year
        #[arg(short, long)]
        year: Option<u8>,
    },
    /// Update PDF metadata
    Update {
        /// PDF ID
        pdf_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        year: Option<u8>,
        #[arg(long)]
        subject: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// Mark active or inactive
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a PDF
    Delete {
        /// PDF ID
        pdf_id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Import drive files the backend does not know yet
    CacheDrive,
    /// Reassign PDFs whose uploader no longer exists
    FixUploaders,
}

#[derive(Debug, Serialize, Tabled)]
struct PdfRow {
    id: String,
    title: String,
    department: String,
    year: String,
    subject: String,
    views: u64,
    uploader: String,
    active: bool,
}

impl From<&Pdf> for PdfRow {
    fn from(pdf: &Pdf) -> Self {
        Self {
            id: pdf.id.clone(),
            title: pdf.title.clone(),
            department: output::or_dash(pdf.department.as_deref()),
            year: output::or_dash(pdf.year),
            subject: output::or_dash(pdf.subject.as_deref()),
            views: pdf.view_count,
            uploader: output::or_dash(pdf.uploader_name()),
            active: pdf.is_active,
        }
    }
}

/// Execute PDF commands
pub async fn execute(args: &PdfArgs, ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    let service = ctx.pdfs();
    match &args.command {
        PdfCommand::List {
            page,
            search,
            department,
            year,
        } => {
            let filter = PdfFilter {
                search: search.clone(),
                department: department.clone(),
                year: *year,
            };
            let listing = service.list(ctx.page(*page), &filter).await?;
            match format {
                OutputFormat::Json => output::print_json(&listing),
                OutputFormat::Table => {
                    let rows: Vec<PdfRow> = listing.items.iter().map(PdfRow::from).collect();
                    output::print_list(&rows, format);
                    output::print_page_footer(&listing.pagination, &listing.window);
                }
            }
        }
        PdfCommand::Update {
            pdf_id,
            title,
            description,
            department,
            year,
            subject,
            tags,
            active,
        } => {
            let update = UpdatePdf {
                title: title.clone(),
                description: description.clone(),
                department: department.clone(),
                year: *year,
                subject: subject.clone(),
                tags: tags.clone(),
                is_active: *active,
            };
            let pdf = service.update(pdf_id, update).await?;
            match format {
                OutputFormat::Json => output::print_json(&pdf),
                OutputFormat::Table => output::print_success(&format!("PDF '{}' updated", pdf.title)),
            }
        }
        PdfCommand::Delete { pdf_id, yes } => {
            if !super::confirm(&format!("Delete PDF {pdf_id}?"), *yes)? {
                output::print_warning("Cancelled");
                return Ok(());
            }
            let response = service.delete(pdf_id).await?;
            output::print_success(&response.message);
        }
        PdfCommand::CacheDrive => {
            let response = service.cache_drive_files().await?;
            match format {
                OutputFormat::Json => output::print_json(&response),
                OutputFormat::Table => output::print_success(&format!(
                    "{} of {} drive files cached",
                    response.cached, response.total
                )),
            }
        }
        PdfCommand::FixUploaders => {
            let response = service.fix_orphaned_uploaders().await?;
            output::print_success(&response.message);
        }
    }
    Ok(())
}
