//! Shared fixtures: an in-memory SQLite catalog with the schema applied.

#![allow(dead_code)]

use chrono::Utc;
use sea_orm::prelude::Decimal;
use sea_orm::{ActiveValue::NotSet, ColumnTrait, Condition, ConnectOptions, Set};

use catalog_api::infra::repositories::entities::{category, product};
use catalog_api::infra::{Database, Repository, UnitOfWork, UnitOfWorkFactory};
use catalog_api::NewCategory;

/// Fresh database per test.
///
/// One pooled connection, since every SQLite `:memory:` connection is a
/// separate database.
pub async fn setup() -> (Database, UnitOfWorkFactory) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let connection = sea_orm::Database::connect(options)
        .await
        .expect("open in-memory sqlite");
    let db = Database::from_connection(connection);
    db.run_migrations().await.expect("apply migrations");

    let factory = UnitOfWorkFactory::new(db.get_connection());
    (db, factory)
}

/// Insert categories in the given order and return them as stored.
pub async fn seed_categories(factory: &UnitOfWorkFactory, names: &[&str]) -> Vec<category::Model> {
    let uow = factory.create();
    for name in names {
        let model = NewCategory::new(*name, format!("{}.jpg", name.to_lowercase()))
            .try_into_active_model()
            .expect("valid category");
        uow.categories().add(model);
    }
    uow.commit().await.expect("commit categories");

    let mut stored = Vec::new();
    for name in names {
        let found = uow
            .categories()
            .find_single(Condition::all().add(category::Column::Name.eq(*name)))
            .await
            .expect("query category")
            .expect("category present");
        stored.push(found);
    }
    stored
}

/// Active model for a product; the store assigns the id.
pub fn new_product(name: &str, price: Decimal, category_id: i32) -> product::ActiveModel {
    product::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(format!("{} description", name)),
        price: Set(price),
        image_url: Set(format!("{}.jpg", name.to_lowercase().replace(' ', "-"))),
        stock: Set(5.0),
        registered_at: Set(Utc::now()),
        category_id: Set(category_id),
    }
}

/// Insert `count` products named `Item 001`, `Item 002`, ... in one commit.
pub async fn seed_products(factory: &UnitOfWorkFactory, category_id: i32, count: usize) {
    let uow = factory.create();
    for i in 1..=count {
        uow.products().add(new_product(
            &format!("Item {:03}", i),
            Decimal::from(10 + i as i64),
            category_id,
        ));
    }
    uow.commit().await.expect("commit products");
}
