//! Order inspection commands.

use console::style;

use super::open_service;
use crate::config::Settings;
use crate::models::Order;

fn print_order(order: &Order) {
    println!(
        "  {:>5}  {:<20} {:<20} {}",
        order.id, order.patient_first_name, order.patient_last_name, order.patient_dob
    );
}

/// List all orders.
pub async fn cmd_orders_list(settings: &Settings) -> anyhow::Result<()> {
    let service = open_service(settings)?;
    let orders = service.list().await?;

    if orders.is_empty() {
        println!("{} No orders yet", style("!").yellow());
        return Ok(());
    }

    println!(
        "  {:>5}  {:<20} {:<20} {}",
        style("ID").bold(),
        style("First name").bold(),
        style("Last name").bold(),
        style("DOB").bold()
    );
    for order in &orders {
        print_order(order);
    }
    println!("\n{} {} orders", style("→").dim(), orders.len());
    Ok(())
}

/// Show a single order.
pub async fn cmd_orders_show(settings: &Settings, id: i32) -> anyhow::Result<()> {
    let service = open_service(settings)?;
    let order = service.get(id).await?;
    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}

/// Delete an order.
pub async fn cmd_orders_delete(settings: &Settings, id: i32) -> anyhow::Result<()> {
    let service = open_service(settings)?;
    service.delete(id).await?;
    println!("{} Deleted order {}", style("✓").green(), id);
    Ok(())
}
