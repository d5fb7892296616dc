//! Catalog commands - Read-only listings and lookups.

use crate::cli::args::{CategoriesArgs, ProductsArgs};
use crate::config::{Config, PAGINATION_HEADER};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::entities::{category, product};
use crate::infra::{Database, Repository, UnitOfWork, UnitOfWorkFactory};
use crate::types::PageMetadata;

async fn factory(config: &Config) -> AppResult<UnitOfWorkFactory> {
    let db = Database::connect(config).await?;
    Ok(UnitOfWorkFactory::from_config(db.get_connection(), config))
}

fn print_meta(meta: &PageMetadata) -> AppResult<()> {
    println!("{}: {}", PAGINATION_HEADER, meta.to_header_value()?);
    Ok(())
}

fn print_category(category: &category::Model) {
    println!("#{:<4} {:<30} {}", category.id, category.name, category.image_url);
}

fn print_product(product: &product::Model) {
    println!(
        "#{:<4} {:<20} {:>10} stock={:<6} category={}",
        product.id, product.name, product.price, product.stock, product.category_id
    );
}

/// List categories, paged or with their products
pub async fn categories(args: CategoriesArgs, config: Config) -> AppResult<()> {
    let uow = factory(&config).await?.create();

    if args.with_products {
        for entry in uow.categories().categories_with_products().await? {
            print_category(&entry.category);
            for product in &entry.products {
                print!("    ");
                print_product(product);
            }
        }
    } else {
        let page = uow
            .categories()
            .categories_page(&args.paging.to_request()?)
            .await?;
        print_meta(&page.meta)?;
        page.items.iter().for_each(print_category);
    }

    uow.close();
    Ok(())
}

/// List products, paged or cheapest first
pub async fn products(args: ProductsArgs, config: Config) -> AppResult<()> {
    let uow = factory(&config).await?.create();

    if args.by_price {
        uow.products()
            .products_by_ascending_price()
            .await?
            .iter()
            .for_each(print_product);
    } else {
        let page = uow
            .products()
            .products_page(&args.paging.to_request()?)
            .await?;
        print_meta(&page.meta)?;
        page.items.iter().for_each(print_product);
    }

    uow.close();
    Ok(())
}

/// Show one category
pub async fn category(id: i32, config: Config) -> AppResult<()> {
    let uow = factory(&config).await?.create();
    let found = uow.categories().get_by_id(id).await?.ok_or_not_found()?;
    print_category(&found);
    uow.close();
    Ok(())
}

/// Show one product
pub async fn product(id: i32, config: Config) -> AppResult<()> {
    let uow = factory(&config).await?.create();
    let found = uow.products().get_by_id(id).await?.ok_or_not_found()?;
    print_product(&found);
    uow.close();
    Ok(())
}
