//! Orders command implementations

use crate::cli::output::{format_order_detail, format_orders_json, format_orders_table};
use crate::cli::{
    AppContext, OrdersCreateArgs, OrdersDeleteArgs, OrdersListArgs, OrdersShowArgs,
    OrdersUpdateArgs,
};
use crate::client::types::PurchaseOrder;
use colored::Colorize;
use std::path::Path;

/// Handle `podesk orders list`
pub async fn handle_orders_list(
    args: &OrdersListArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let orders = ctx.client.get_orders().await?;

    if args.json {
        Ok(format_orders_json(&orders))
    } else if orders.is_empty() {
        Ok("No purchase orders yet.".to_string())
    } else {
        Ok(format_orders_table(&orders))
    }
}

/// Handle `podesk orders show`
pub async fn handle_orders_show(
    args: &OrdersShowArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let order = ctx.client.get_order(&args.id).await?;

    if args.json {
        Ok(serde_json::to_string_pretty(&order)?)
    } else {
        Ok(format_order_detail(&order))
    }
}

/// Handle `podesk orders create`
pub async fn handle_orders_create(
    args: &OrdersCreateArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let order = read_order_file(&args.file)?;
    let created = ctx.client.create_order(&order).await?;

    Ok(format!(
        "{} Created order {} ({})",
        "✓".green(),
        created.order_no,
        created.id.as_deref().unwrap_or("?")
    ))
}

/// Handle `podesk orders update`
pub async fn handle_orders_update(
    args: &OrdersUpdateArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let order = read_order_file(&args.file)?;
    let updated = ctx.client.update_order(&args.id, &order).await?;

    Ok(format!("{} Updated order {}", "✓".green(), updated.order_no))
}

/// Handle `podesk orders delete`
pub async fn handle_orders_delete(
    args: &OrdersDeleteArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    ctx.client.delete_order(&args.id).await?;
    Ok(format!("{} Deleted order {}", "✓".green(), args.id))
}

fn read_order_file(path: &Path) -> Result<PurchaseOrder, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let order: PurchaseOrder = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid order JSON in {}: {}", path.display(), e))?;
    Ok(order)
}
