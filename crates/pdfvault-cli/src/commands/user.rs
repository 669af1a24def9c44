//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use pdfvault_client::dto::SheetsResponse;
use pdfvault_core::AppResult;
use pdfvault_entity::user::{User, UserFilter, UserRole};

use crate::context::CliContext;
use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users
    List {
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u64,
        /// Search name and email
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by role (client, admin)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Switch a user between client and admin
    ToggleRole {
        /// User ID
        user_id: String,
    },
    /// Enable a user
    Activate {
        /// User ID
        user_id: String,
    },
    /// Disable a user
    Deactivate {
        /// User ID
        user_id: String,
    },
    /// Delete a user
    Delete {
        /// User ID
        user_id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Import users from the registration sheet
    SyncSheets,
    /// Show the registration sheet connection status
    SheetsStatus,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    department: String,
    year: String,
    status: String,
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            department: output::or_dash(u.department.as_deref()),
            year: output::or_dash(u.year),
            status: if u.is_active { "active" } else { "inactive" }.to_string(),
            last_login: output::or_dash(u.last_login.map(|t| t.format("%Y-%m-%d %H:%M"))),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    let service = ctx.users();
    match &args.command {
        UserCommand::List { page, search, role } => {
            let role = role.as_deref().map(str::parse::<UserRole>).transpose()?;
            let filter = UserFilter {
                search: search.clone(),
                role,
            };
            let listing = service.list(ctx.page(*page), &filter).await?;
            match format {
                OutputFormat::Json => output::print_json(&listing),
                OutputFormat::Table => {
                    let rows: Vec<UserRow> = listing.items.iter().map(UserRow::from).collect();
                    output::print_list(&rows, format);
                    output::print_page_footer(&listing.pagination, &listing.window);
                }
            }
        }
        UserCommand::ToggleRole { user_id } => {
            let user = service.toggle_role(user_id).await?;
            print_user(&user, &format!("{} is now {}", user.name, user.role), format);
        }
        UserCommand::Activate { user_id } => {
            let user = service.set_active(user_id, true).await?;
            print_user(&user, &format!("User '{}' enabled", user.name), format);
        }
        UserCommand::Deactivate { user_id } => {
            let user = service.set_active(user_id, false).await?;
            print_user(&user, &format!("User '{}' disabled", user.name), format);
        }
        UserCommand::Delete { user_id, yes } => {
            if !super::confirm(&format!("Delete user {user_id}?"), *yes)? {
                output::print_warning("Cancelled");
                return Ok(());
            }
            let response = service.delete(user_id).await?;
            output::print_success(&response.message);
        }
        UserCommand::SyncSheets => {
            let response = service.sync_sheets().await?;
            print_sheets(&response, "Sheet sync finished", format);
        }
        UserCommand::SheetsStatus => {
            let response = service.sheets_status().await?;
            print_sheets(&response, "Sheet status", format);
        }
    }
    Ok(())
}

fn print_user(user: &User, message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(user),
        OutputFormat::Table => output::print_success(message),
    }
}

fn print_sheets(response: &SheetsResponse, fallback: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(response),
        OutputFormat::Table => {
            output::print_success(response.message.as_deref().unwrap_or(fallback));
            if let serde_json::Value::Object(map) = &response.data {
                for (key, value) in map {
                    let value = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    output::print_kv(key, &value);
                }
            }
        }
    }
}
