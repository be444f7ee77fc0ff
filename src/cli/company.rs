//! Company profile command implementations

use crate::cli::output::{format_company, format_company_json};
use crate::cli::{AppContext, CompanyShowArgs, CompanyUpdateArgs};
use crate::client::types::CompanyProfile;
use colored::Colorize;

/// Handle `podesk company show`
pub async fn handle_company_show(
    args: &CompanyShowArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let profile = ctx.client.get_company_profile().await?;

    if args.json {
        Ok(format_company_json(&profile))
    } else {
        Ok(format_company(&profile))
    }
}

/// Handle `podesk company update`
pub async fn handle_company_update(
    args: &CompanyUpdateArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("Failed to read {}: {}", args.file.display(), e))?;
    let profile: CompanyProfile = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid profile JSON in {}: {}", args.file.display(), e))?;

    let updated = ctx.client.update_company_profile(&profile).await?;

    Ok(format!(
        "{} Company profile updated ({})",
        "✓".green(),
        updated.company_name
    ))
}
