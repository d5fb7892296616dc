//! Category repository: generic CRUD plus category-specific query shapes.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::QueryOrder;

use super::base::Repository;
use super::entities::{category, product};
use crate::errors::AppResult;
use crate::infra::session::Session;
use crate::types::{PageRequest, PagedList};

/// A category with its products materialized in the same query
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithProducts {
    pub category: category::Model,
    pub products: Vec<product::Model>,
}

/// Category repository trait for dependency injection.
#[async_trait]
pub trait CategoryRepository: Repository<category::Entity, category::ActiveModel> {
    /// All categories with their products eagerly loaded, ordered by
    /// category id and then product id.
    async fn categories_with_products(&self) -> AppResult<Vec<CategoryWithProducts>>;

    /// One page of categories ordered by name
    async fn categories_page(&self, request: &PageRequest)
        -> AppResult<PagedList<category::Model>>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryStore {
    session: Arc<Session>,
}

impl CategoryStore {
    /// Create new repository instance bound to `session`
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

impl Repository<category::Entity, category::ActiveModel> for CategoryStore {
    fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn categories_with_products(&self) -> AppResult<Vec<CategoryWithProducts>> {
        let rows = self
            .get()
            .order_by_asc(category::Column::Id)
            .find_with_related(product::Entity)
            .order_by_asc(product::Column::Id)
            .all(self.session.connection())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, products)| CategoryWithProducts { category, products })
            .collect())
    }

    async fn categories_page(
        &self,
        request: &PageRequest,
    ) -> AppResult<PagedList<category::Model>> {
        let query = self.get().order_by_asc(category::Column::Name);
        self.get_page(query, request).await
    }
}
