//! Catalog browsing commands.

use clap::Subcommand;
use optica_core::ProductId;
use optica_storefront::catalog::CatalogError;
use optica_storefront::models::Product;
use optica_storefront::session::Storefront;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all products
    List,
    /// Search products by name or brand
    Search {
        /// Search query
        query: String,
    },
    /// Show one product in detail
    Show {
        /// Product id
        id: i32,
    },
    /// List lens options
    Lenses,
    /// Show the available filter values
    Filters,
}

pub async fn run(session: &Storefront, action: CatalogAction) -> Result<(), CatalogError> {
    let catalog = session.catalog();

    match action {
        CatalogAction::List => {
            print_products(&catalog.products().await?);
        }
        CatalogAction::Search { query } => {
            print_products(&catalog.search(&query).await?);
        }
        CatalogAction::Show { id } => match catalog.product(ProductId::new(id)).await? {
            Some(product) => print_product_detail(&product),
            None => println!("No product with id {id}"),
        },
        CatalogAction::Lenses => {
            for lens in catalog.lenses().await? {
                println!(
                    "{:>4}  {:<20} {:<12} {}",
                    lens.id, lens.kind, lens.material, lens.price
                );
            }
        }
        CatalogAction::Filters => {
            let mut options = catalog.filter_options().await;
            if options.is_empty() {
                options = catalog.derived_filter_options().await?;
            }
            println!("Brands: {}", options.brands.join(", "));
            println!("Shapes: {}", options.shapes.join(", "));
            println!("Colors: {}", options.colors.join(", "));
        }
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for product in products {
        println!(
            "{:>4}  {:<30} {:<15} {:<10} {}",
            product.id, product.name, product.brand, product.shape, product.price
        );
    }
}

fn print_product_detail(product: &Product) {
    println!("{} ({})", product.name, product.brand);
    println!("  Price:    {}", product.price);
    println!("  Shape:    {}", product.shape);
    println!("  Material: {}", product.material);
    println!("  Color:    {}", product.color);
    if let Some(size) = &product.size {
        println!("  Size:     {size}");
    }
    println!("  In stock: {}", product.in_stock);
    if let Some(description) = &product.description {
        println!("\n{description}");
    }
}
