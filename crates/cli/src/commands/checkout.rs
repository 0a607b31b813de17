//! Checkout command.

use clap::Args;
use optica_core::PaymentMethod;
use optica_storefront::checkout::CheckoutError;
use optica_storefront::models::Address;
use optica_storefront::session::Storefront;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name
    #[arg(long)]
    name: String,

    /// Street address
    #[arg(long)]
    street: String,

    /// City
    #[arg(long)]
    city: String,

    /// State
    #[arg(long)]
    state: String,

    /// Postal code
    #[arg(long)]
    pincode: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Payment method (cod, card, upi)
    #[arg(long, default_value = "cod")]
    payment: String,
}

pub async fn run(session: &Storefront, args: CheckoutArgs) -> Result<(), CheckoutError> {
    let method: PaymentMethod = args.payment.parse().unwrap_or_else(|_| {
        println!("Unknown payment method '{}', using cash on delivery", args.payment);
        PaymentMethod::Cod
    });

    let quote = session.checkout().quote();
    println!("Subtotal: {}", quote.subtotal);
    println!("Shipping: {}", quote.shipping_fee);
    println!("Tax:      {}", quote.tax);
    println!("Total:    {}", quote.total);

    let address = Address {
        name: args.name,
        street: args.street,
        city: args.city,
        state: args.state,
        pincode: args.pincode,
        phone: args.phone,
    };

    let order = session.checkout().place_order(address, method).await?;

    println!();
    println!("Order placed: {}", order.order_number);
    println!("Status: {}", order.current_status());
    println!("Amount: {}", order.total);
    Ok(())
}
