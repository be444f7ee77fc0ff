//! Login and logout command implementations

use crate::cli::{AppContext, LoginArgs};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Handle `podesk login`
pub async fn handle_login(
    args: &LoginArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password()?,
    };

    let login = ctx.client.login(&args.username, &password).await?;

    let role = login.user.role.as_deref().unwrap_or("user");
    Ok(format!(
        "{} Logged in as {} ({})",
        "✓".green(),
        login.user.username,
        role
    ))
}

/// Handle `podesk logout`
pub fn handle_logout(ctx: &AppContext) -> String {
    ctx.client.logout();
    format!("{} Logged out", "✓".green())
}

fn prompt_password() -> Result<String, Box<dyn std::error::Error>> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err("Password cannot be empty".into());
    }
    Ok(password)
}
