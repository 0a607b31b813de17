//! Order tracking commands.

use clap::Args;
use optica_core::ORDER_PROGRESSION;
use optica_storefront::models::Order;
use optica_storefront::session::Storefront;
use optica_storefront::tracking::TrackingError;

#[derive(Args)]
pub struct TrackArgs {
    /// Order number, e.g. ORD-2026-042
    order_number: String,
}

pub async fn run(session: &Storefront, args: TrackArgs) -> Result<(), TrackingError> {
    let order = session.tracker().find_order(&args.order_number).await?;
    print_order(&order);
    Ok(())
}

pub async fn list_orders(session: &Storefront) -> Result<(), TrackingError> {
    let user_id = session.config().user_id;
    let orders = session.tracker().orders_for_user(user_id).await?;

    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }
    for order in &orders {
        println!(
            "{:<16} {}  {:<10} {}",
            order.order_number,
            order.order_date.format("%Y-%m-%d"),
            order.current_status().to_string(),
            order.total
        );
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!("Order {}", order.order_number);
    println!("Placed: {}", order.order_date.format("%Y-%m-%d %H:%M"));
    println!("Total:  {}", order.total);
    println!();

    // Progress bar over the normal fulfillment stages.
    let current = order.current_status();
    for stage in ORDER_PROGRESSION {
        let marker = if order.is_status_reached(stage) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("  {marker} {stage}");
    }
    if current.progress_index().is_none() {
        println!("  --> {current}");
    }

    if !order.status_history.is_empty() {
        println!();
        println!("History:");
        for entry in &order.status_history {
            let location = entry
                .location
                .as_deref()
                .map(|l| format!(" ({l})"))
                .unwrap_or_default();
            println!(
                "  {}  {}{}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.status,
                location
            );
        }
    }
}
