//! Cart commands.

use clap::Subcommand;
use optica_core::{CartItemId, LensId, ProductId};
use optica_storefront::cart::CartError;
use optica_storefront::models::LineRequest;
use optica_storefront::session::Storefront;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product: i32,

        /// Lens option id
        #[arg(short, long)]
        lens: Option<i32>,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (0 removes it)
    SetQuantity {
        /// Cart line id
        line: i32,
        /// New quantity
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Cart line id
        line: i32,
    },
    /// Remove everything from the cart
    Clear,
    /// Reload the cart from the server
    Refresh,
}

pub async fn run(session: &Storefront, action: CartAction) -> Result<(), CartError> {
    let cart = session.cart();

    match action {
        CartAction::Show => {}
        CartAction::Add {
            product,
            lens,
            quantity,
        } => {
            cart.add(LineRequest {
                product_id: ProductId::new(product),
                lens_id: lens.map(LensId::new),
                quantity,
            })
            .await?;
        }
        CartAction::SetQuantity { line, quantity } => {
            cart.update_quantity(CartItemId::new(line), quantity).await?;
        }
        CartAction::Remove { line } => {
            cart.remove(CartItemId::new(line)).await?;
        }
        CartAction::Clear => {
            cart.clear().await?;
        }
        CartAction::Refresh => {
            cart.refresh().await?;
        }
    }

    print_cart(session);
    Ok(())
}

fn print_cart(session: &Storefront) {
    let cart = session.cart();
    let lines = cart.lines();

    if lines.is_empty() {
        println!("Cart is empty");
    } else {
        for line in &lines {
            let lens = line
                .lens
                .as_ref()
                .map(|l| format!(" + {} lens ({})", l.kind, l.price))
                .unwrap_or_default();
            println!(
                "{:>4}  {:<30} {} x{}{}  = {}",
                line.id,
                line.name,
                line.unit_price,
                line.quantity,
                lens,
                line.subtotal()
            );
        }
        println!("Total: {} ({} items)", cart.total(), cart.count());
    }

    if let Some(message) = cart.error_message() {
        println!("Warning: {message}");
    }
}
