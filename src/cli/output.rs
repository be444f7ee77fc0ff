//! Output formatting helpers for CLI commands

use crate::client::types::{CompanyProfile, PurchaseOrder, User};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format purchase orders as a table
pub fn format_orders_table(orders: &[PurchaseOrder]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID", "Order No", "Date", "Customer", "Mill", "Product", "Weight", "Bags", "Rate",
    ]);

    for order in orders {
        table.add_row(vec![
            Cell::new(order.id.as_deref().unwrap_or("-")),
            Cell::new(&order.order_no),
            Cell::new(&order.order_date),
            Cell::new(&order.customer),
            Cell::new(&order.mill),
            Cell::new(&order.product),
            Cell::new(&order.weight),
            Cell::new(&order.bags),
            Cell::new(&order.rate),
        ]);
    }

    table.to_string()
}

/// Format purchase orders as JSON
pub fn format_orders_json(orders: &[PurchaseOrder]) -> String {
    serde_json::to_string_pretty(&json!({ "orders": orders }))
        .unwrap_or_else(|_| "{}".to_string())
}

/// Format a single order as readable text
pub fn format_order_detail(order: &PurchaseOrder) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![Cell::new("Order No"), Cell::new(&order.order_no)]);
    table.add_row(vec![Cell::new("Date"), Cell::new(&order.order_date)]);
    table.add_row(vec![Cell::new("Customer"), Cell::new(&order.customer)]);
    table.add_row(vec![Cell::new("Broker"), Cell::new(&order.broker)]);
    table.add_row(vec![Cell::new("Mill"), Cell::new(&order.mill)]);
    table.add_row(vec![Cell::new("Product"), Cell::new(&order.product)]);
    table.add_row(vec![Cell::new("Weight"), Cell::new(&order.weight)]);
    table.add_row(vec![Cell::new("Bags"), Cell::new(&order.bags)]);
    table.add_row(vec![Cell::new("Rate"), Cell::new(&order.rate)]);
    if !order.terms_conditions.is_empty() {
        table.add_row(vec![Cell::new("Terms"), Cell::new(&order.terms_conditions)]);
    }

    table.to_string()
}

/// Format users as a table
pub fn format_users_table(users: &[User]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Username", "Role"]);

    for user in users {
        table.add_row(vec![
            Cell::new(user.id.as_deref().unwrap_or("-")),
            Cell::new(&user.username),
            Cell::new(user.role.as_deref().unwrap_or("-")),
        ]);
    }

    table.to_string()
}

/// Format users as JSON
pub fn format_users_json(users: &[User]) -> String {
    serde_json::to_string_pretty(&json!({ "users": users })).unwrap_or_else(|_| "{}".to_string())
}

/// Format the company profile as readable text
pub fn format_company(profile: &CompanyProfile) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![Cell::new("Company"), Cell::new(&profile.company_name)]);
    table.add_row(vec![Cell::new("Address"), Cell::new(&profile.address)]);
    table.add_row(vec![Cell::new("Mobile"), Cell::new(&profile.mobile)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&profile.email)]);
    table.add_row(vec![Cell::new("GST No"), Cell::new(&profile.gst_number)]);
    table.add_row(vec![
        Cell::new("Bank Details"),
        Cell::new(&profile.bank_details),
    ]);

    table.to_string()
}

/// Format the company profile as JSON
pub fn format_company_json(profile: &CompanyProfile) -> String {
    serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string())
}
