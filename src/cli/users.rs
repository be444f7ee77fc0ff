//! Users command implementations

use crate::cli::output::{format_users_json, format_users_table};
use crate::cli::{AppContext, UsersListArgs};

/// Handle `podesk users list`
pub async fn handle_users_list(
    args: &UsersListArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let users = ctx.client.get_users().await?;

    if args.json {
        Ok(format_users_json(&users))
    } else {
        Ok(format_users_table(&users))
    }
}
