//! Access-tag CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use pdfvault_core::AppResult;
use pdfvault_entity::tag::{AccessTag, BulkTagAction, TagFilter, TagSort};
use pdfvault_service::tag::{NewTag, TagEdit};
use pdfvault_service::TagService;

use crate::context::CliContext;
use crate::output::{self, OutputFormat};

/// Arguments for tag commands
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Tag subcommand
    #[command(subcommand)]
    pub command: TagCommand,
}

/// Tag subcommands
#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// List access tags
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Only active (true) or inactive (false) tags
        #[arg(short, long)]
        active: Option<bool>,
        /// Search name and description
        #[arg(short, long)]
        search: Option<String>,
        /// Order: name, category, usage, created
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Show tag statistics
    Stats,
    /// Create a tag
    Create {
        /// Tag name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Category; defaults to the catalog default
        #[arg(short, long)]
        category: Option<String>,
        /// Hex color such as #3B82F6
        #[arg(long)]
        color: Option<String>,
    },
    /// Update a tag
    Update {
        /// Tag ID
        tag_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a tag
    Delete {
        /// Tag ID
        tag_id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Activate, deactivate or delete several tags at once
    Bulk {
        /// activate, deactivate or delete
        action: String,
        /// Tag IDs
        #[arg(required = true)]
        tag_ids: Vec<String>,
        /// Skip confirmation for deletes
        #[arg(short, long)]
        yes: bool,
    },
    /// Show tag categories with their counts
    Categories,
}

#[derive(Debug, Serialize, Tabled)]
struct TagRow {
    id: String,
    name: String,
    category: String,
    color: String,
    usage: u64,
    active: bool,
}

impl TagRow {
    fn new(tag: &AccessTag, service: &TagService) -> Self {
        Self {
            id: tag.id.clone(),
            name: tag.name.clone(),
            category: service
                .category_info(&tag.category)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| tag.category.clone()),
            color: output::or_dash(tag.color.as_deref()),
            usage: tag.usage_count,
            active: tag.is_active,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    value: String,
    label: String,
    color: String,
    tags: u64,
}

/// Execute tag commands
pub async fn execute(args: &TagArgs, ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    let service = ctx.tags();
    match &args.command {
        TagCommand::List {
            category,
            active,
            search,
            sort,
        } => {
            let filter = TagFilter {
                category: category.clone(),
                active: *active,
                search: search.clone(),
                sort: sort.parse::<TagSort>()?,
            };
            let tags = service.list(&filter).await?;
            let rows: Vec<TagRow> = tags.iter().map(|t| TagRow::new(t, &service)).collect();
            output::print_list(&rows, format);
        }
        TagCommand::Stats => {
            let stats = service.stats().await?;
            match format {
                OutputFormat::Json => output::print_json(&stats),
                OutputFormat::Table => {
                    output::print_kv("Total", &stats.total.to_string());
                    output::print_kv("Active", &stats.active.to_string());
                    output::print_kv("Inactive", &stats.inactive.to_string());
                    output::print_kv("Total usage", &stats.usage.total_usage.to_string());
                    output::print_kv("Average usage", &format!("{:.1}", stats.usage.avg_usage));
                    output::print_kv("Highest usage", &stats.usage.max_usage.to_string());
                }
            }
        }
        TagCommand::Create {
            name,
            description,
            category,
            color,
        } => {
            let tag = service
                .create(NewTag {
                    name: name.clone(),
                    description: description.clone(),
                    category: category.clone(),
                    color: color.clone(),
                })
                .await?;
            print_tag(&tag, "created", format);
        }
        TagCommand::Update {
            tag_id,
            name,
            description,
            category,
            color,
            active,
        } => {
            let edit = TagEdit {
                name: name.clone(),
                description: description.clone(),
                category: category.clone(),
                color: color.clone(),
                is_active: *active,
            };
            let tag = service.update(tag_id, edit).await?;
            print_tag(&tag, "updated", format);
        }
        TagCommand::Delete { tag_id, yes } => {
            if !super::confirm(&format!("Delete access tag {tag_id}?"), *yes)? {
                output::print_warning("Cancelled");
                return Ok(());
            }
            let response = service.delete(tag_id).await?;
            output::print_success(&response.message);
        }
        TagCommand::Bulk {
            action,
            tag_ids,
            yes,
        } => {
            let action = action.parse::<BulkTagAction>()?;
            if action == BulkTagAction::Delete
                && !super::confirm(&format!("Delete {} access tags?", tag_ids.len()), *yes)?
            {
                output::print_warning("Cancelled");
                return Ok(());
            }
            let response = service.bulk(action, tag_ids.clone()).await?;
            match format {
                OutputFormat::Json => output::print_json(&response),
                OutputFormat::Table => output::print_success(&format!(
                    "{action}: {} of {} tags changed",
                    response.modified_count, response.matched_count
                )),
            }
        }
        TagCommand::Categories => {
            let rows: Vec<CategoryRow> = service
                .categories()
                .await?
                .into_iter()
                .map(|o| CategoryRow {
                    value: o.category.value,
                    label: o.category.label,
                    color: o.category.color,
                    tags: o.count,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

fn print_tag(tag: &AccessTag, verb: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(tag),
        OutputFormat::Table => {
            output::print_success(&format!("Access tag '{}' {verb}", tag.name))
        }
    }
}
