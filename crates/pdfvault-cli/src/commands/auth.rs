//! Login, logout and whoami.

use clap::Args;

use pdfvault_core::{AppError, AppResult};

use crate::context::CliContext;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Admin username
    pub username: String,
    /// Password; prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Sign in and store the token.
pub async fn login(args: &LoginArgs, ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?,
    };

    let admin = ctx.auth().login(&args.username, &password).await?;
    match format {
        OutputFormat::Json => output::print_json(&admin),
        OutputFormat::Table => output::print_success(&format!(
            "Signed in as {}",
            admin.name.as_deref().or(admin.username.as_deref()).unwrap_or(&admin.id)
        )),
    }
    Ok(())
}

/// Sign out.
pub async fn logout(ctx: &CliContext) -> AppResult<()> {
    if !ctx.client().context().session().is_authenticated() {
        output::print_warning("Not signed in");
        return Ok(());
    }
    ctx.auth().logout().await?;
    output::print_success("Signed out");
    Ok(())
}

/// Show the signed-in administrator.
pub async fn whoami(ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    if !ctx.client().context().session().is_authenticated() {
        return Err(AppError::authentication(
            "Not signed in. Run `pdfvault-admin login <username>` first",
        ));
    }
    let admin = ctx.auth().me().await?;
    match format {
        OutputFormat::Json => output::print_json(&admin),
        OutputFormat::Table => {
            output::print_kv("ID", &admin.id);
            output::print_kv("Username", &output::or_dash(admin.username.as_deref()));
            output::print_kv("Name", &output::or_dash(admin.name.as_deref()));
            output::print_kv("Role", &admin.role);
            output::print_kv("Environment admin", &admin.is_env_admin.to_string());
        }
    }
    Ok(())
}
