//! Repository behaviour against an in-memory SQLite store.

mod common;

use sea_orm::prelude::Decimal;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use catalog_api::errors::AppError;
use catalog_api::infra::repositories::entities::{category, product};
use catalog_api::infra::{CategoryRepository, ProductRepository, Repository, UnitOfWork};
use catalog_api::PageRequest;

use common::{new_product, seed_categories, seed_products, setup};

#[tokio::test]
async fn test_get_composes_before_running() {
    let (db, factory) = setup().await;
    seed_categories(&factory, &["Drinks", "Snacks"]).await;

    let uow = factory.create();
    let query = uow
        .categories()
        .get()
        .filter(category::Column::Name.eq("Snacks"));
    let rows = query.all(db.connection()).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Snacks");
}

#[tokio::test]
async fn test_get_by_id() {
    let (_db, factory) = setup().await;
    let stored = seed_categories(&factory, &["Drinks"]).await;

    let uow = factory.create();
    let found = uow.categories().get_by_id(stored[0].id).await.unwrap();
    let missing = uow.categories().get_by_id(stored[0].id + 100).await.unwrap();

    assert_eq!(found, Some(stored[0].clone()));
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_single_rejects_multiple_matches() {
    let (_db, factory) = setup().await;
    seed_categories(&factory, &["Drinks", "Desserts", "Snacks"]).await;

    let uow = factory.create();
    let starts_with_d = Condition::all().add(category::Column::Name.starts_with("D"));
    let result = uow.categories().find_single(starts_with_d).await;
    assert!(matches!(result, Err(AppError::MultipleMatches(_))));

    let none = Condition::all().add(category::Column::Name.eq("Toys"));
    assert!(uow.categories().find_single(none).await.unwrap().is_none());
}

#[tokio::test]
async fn test_first_and_count() {
    let (_db, factory) = setup().await;
    let uow = factory.create();
    assert!(uow.categories().first().await.unwrap().is_none());
    assert_eq!(uow.categories().count().await.unwrap(), 0);

    seed_categories(&factory, &["Drinks", "Snacks"]).await;
    assert!(uow.categories().first().await.unwrap().is_some());
    assert_eq!(uow.categories().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_staged_insert_invisible_until_commit() {
    let (_db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks"]).await;

    let uow = factory.create();
    uow.products()
        .add(new_product("Cola Zero", Decimal::new(550, 2), categories[0].id));

    assert_eq!(uow.pending_changes(), 1);
    assert_eq!(uow.products().count().await.unwrap(), 0);

    let summary = uow.commit().await.unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(uow.pending_changes(), 0);
    assert_eq!(uow.products().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_categories_with_products_groups_rows() {
    let (_db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks", "Snacks", "Toys"]).await;

    let uow = factory.create();
    uow.products()
        .add(new_product("Cola Zero", Decimal::from(5), categories[0].id));
    uow.products()
        .add(new_product("Cheese Toast", Decimal::from(12), categories[1].id));
    uow.products()
        .add(new_product("Orange Juice", Decimal::from(8), categories[0].id));
    uow.commit().await.unwrap();

    let loaded = uow.categories().categories_with_products().await.unwrap();

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].category.name, "Drinks");
    let drinks: Vec<_> = loaded[0].products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(drinks, vec!["Cola Zero", "Orange Juice"]);
    assert_eq!(loaded[1].products.len(), 1);
    assert!(loaded[2].products.is_empty());
}

#[tokio::test]
async fn test_categories_page_orders_by_name() {
    let (_db, factory) = setup().await;
    seed_categories(&factory, &["Snacks", "Drinks", "Desserts"]).await;

    let uow = factory.create();
    let page = uow
        .categories()
        .categories_page(&PageRequest::new(1, 2).unwrap())
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Desserts", "Drinks"]);
    assert_eq!(page.meta.total_count, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert!(page.meta.has_next);
    assert!(!page.meta.has_previous);
}

#[tokio::test]
async fn test_products_last_partial_page() {
    let (_db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks"]).await;
    seed_products(&factory, categories[0].id, 23).await;

    let uow = factory.create();
    let page = uow
        .products()
        .products_page(&PageRequest::new(3, 10).unwrap())
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Item 021", "Item 022", "Item 023"]);
    assert_eq!(page.meta.total_count, 23);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.meta.current_page, 3);
    assert!(!page.meta.has_next);
    assert!(page.meta.has_previous);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (_db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks"]).await;
    seed_products(&factory, categories[0].id, 3).await;

    let uow = factory.create();
    let page = uow
        .products()
        .products_page(&PageRequest::new(5, 10).unwrap())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.meta.total_count, 3);
    assert_eq!(page.meta.total_pages, 1);
    assert!(!page.meta.has_next);
}

#[tokio::test]
async fn test_large_page_size_is_honoured() {
    let (_db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks"]).await;
    seed_products(&factory, categories[0].id, 230).await;

    let uow = factory.create();
    let page = uow
        .products()
        .products_page(&PageRequest::new(3, 100).unwrap())
        .await
        .unwrap();

    assert_eq!(page.len(), 30);
    assert_eq!(page.meta.page_size, 100);
    assert_eq!(page.meta.total_pages, 3);
    assert!(!page.meta.has_next);
}

#[tokio::test]
async fn test_invalid_page_request_rejected() {
    let (_db, factory) = setup().await;
    let uow = factory.create();

    let request = PageRequest {
        page_number: 0,
        page_size: 10,
    };
    let result = uow.categories().categories_page(&request).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_empty_categories_page() {
    let (_db, factory) = setup().await;
    let uow = factory.create();

    let page = uow
        .categories()
        .categories_page(&PageRequest::default())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.meta.total_count, 0);
    assert_eq!(page.meta.total_pages, 0);
    assert!(!page.meta.has_next);
    assert!(!page.meta.has_previous);
}

#[tokio::test]
async fn test_products_ordered_by_numeric_price() {
    let (_db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks"]).await;

    let uow = factory.create();
    uow.products()
        .add(new_product("Large Pack", Decimal::from(100), categories[0].id));
    uow.products()
        .add(new_product("Small Cup", Decimal::new(95, 1), categories[0].id));
    uow.products()
        .add(new_product("Medium Jar", Decimal::from(20), categories[0].id));
    uow.commit().await.unwrap();

    let sorted = uow.products().products_by_ascending_price().await.unwrap();
    let names: Vec<_> = sorted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Small Cup", "Medium Jar", "Large Pack"]);
}

#[tokio::test]
async fn test_paginate_free_function_on_custom_query() {
    let (db, factory) = setup().await;
    let categories = seed_categories(&factory, &["Drinks", "Snacks"]).await;
    seed_products(&factory, categories[1].id, 4).await;

    let query = product::Entity::find()
        .filter(product::Column::CategoryId.eq(categories[1].id));
    let page = catalog_api::infra::repositories::paginate(
        query,
        db.connection(),
        &PageRequest::new(2, 3).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.meta.total_count, 4);
}
