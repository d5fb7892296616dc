//! Seed command - Inserts a small demo catalog.

use sea_orm::prelude::Decimal;
use sea_orm::{ColumnTrait, Condition};

use crate::config::Config;
use crate::domain::{NewCategory, NewProduct};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::entities::category;
use crate::infra::{CommitSummary, Database, Repository, UnitOfWork, UnitOfWorkFactory};

const CATEGORIES: &[(&str, &str)] = &[
    ("Drinks", "drinks.jpg"),
    ("Snacks", "snacks.jpg"),
    ("Desserts", "desserts.jpg"),
];

/// (category, name, description, price in cents, stock)
const PRODUCTS: &[(&str, &str, &str, i64, f32)] = &[
    ("Drinks", "Cola Zero", "Sugar-free soda, 350ml can", 550, 50.0),
    ("Drinks", "Orange Juice", "Fresh orange juice, 500ml", 790, 20.0),
    ("Snacks", "Cheese Toast", "Toasted bread with melted cheese", 1250, 10.0),
    ("Snacks", "Chicken Wrap", "Grilled chicken wrap", 1890, 8.0),
    ("Desserts", "Chocolate Cake", "Slice of chocolate cake", 990, 15.0),
    ("Desserts", "Vanilla Pudding", "Vanilla pudding cup", 650, 12.0),
];

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let factory = UnitOfWorkFactory::from_config(db.get_connection(), &config);

    let uow = factory.create();
    let summary = seed_catalog(&uow).await?;
    uow.close();

    if summary.is_empty() {
        println!("Catalog already has data, nothing seeded");
    } else {
        println!("Seeded {} rows", summary.inserted);
    }
    Ok(())
}

/// Insert the demo catalog unless categories already exist.
///
/// Categories are committed first so products can reference the ids the
/// store assigned to them.
pub async fn seed_catalog(uow: &dyn UnitOfWork) -> AppResult<CommitSummary> {
    if uow.categories().count().await? > 0 {
        tracing::info!("Categories present, skipping seed");
        return Ok(CommitSummary::default());
    }

    for (name, image_url) in CATEGORIES {
        uow.categories()
            .add(NewCategory::new(*name, *image_url).try_into_active_model()?);
    }
    let categories = uow.commit().await?;

    for (category_name, name, description, cents, stock) in PRODUCTS {
        let owner = uow
            .categories()
            .find_single(Condition::all().add(category::Column::Name.eq(*category_name)))
            .await?
            .ok_or_not_found()?;

        let product = NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(*cents, 2),
            image_url: format!("{}.jpg", name.to_lowercase().replace(' ', "-")),
            stock: *stock,
            category_id: owner.id,
        };
        uow.products().add(product.try_into_active_model()?);
    }
    let products = uow.commit().await?;

    Ok(CommitSummary {
        inserted: categories.inserted + products.inserted,
        ..CommitSummary::default()
    })
}
