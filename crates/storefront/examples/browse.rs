//! Browse the catalog from the command line.
//!
//! Requires `SUPABASE_URL` and `SUPABASE_ANON_KEY` in the environment or
//! a `.env` file.
//!
//! ```bash
//! cargo run -p confeito-storefront --example browse
//! ```

#![allow(clippy::print_stdout)]

use confeito_core::FilterState;
use confeito_storefront::config::StorefrontConfig;
use confeito_storefront::services::CatalogService;
use confeito_storefront::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confeito_storefront=debug".into()),
        )
        .init();

    let state = AppState::new(StorefrontConfig::from_env()?);
    let catalog = CatalogService::new(state);

    let page = catalog.browse(&FilterState::default()).await?;
    println!(
        "página {}/{} ({} cupcakes no total)",
        page.page, page.total_pages, page.total_items
    );
    for product in &page.items {
        println!("  #{} {} - R$ {}", product.id, product.title, product.price);
    }

    Ok(())
}
