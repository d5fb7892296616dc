//! Product repository: generic CRUD plus product-specific query shapes.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::QueryOrder;

use super::base::Repository;
use super::entities::product;
use crate::errors::AppResult;
use crate::infra::session::Session;
use crate::types::{PageRequest, PagedList};

/// Product repository trait for dependency injection.
#[async_trait]
pub trait ProductRepository: Repository<product::Entity, product::ActiveModel> {
    /// One page of products ordered by id
    async fn products_page(&self, request: &PageRequest) -> AppResult<PagedList<product::Model>>;

    /// Every product, cheapest first.
    ///
    /// Price is a decimal column, so the store compares numerically; ties
    /// fall back to id.
    async fn products_by_ascending_price(&self) -> AppResult<Vec<product::Model>>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    session: Arc<Session>,
}

impl ProductStore {
    /// Create new repository instance bound to `session`
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

impl Repository<product::Entity, product::ActiveModel> for ProductStore {
    fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn products_page(&self, request: &PageRequest) -> AppResult<PagedList<product::Model>> {
        let query = self.get().order_by_asc(product::Column::Id);
        self.get_page(query, request).await
    }

    async fn products_by_ascending_price(&self) -> AppResult<Vec<product::Model>> {
        self.get()
            .order_by_asc(product::Column::Price)
            .order_by_asc(product::Column::Id)
            .all(self.session.connection())
            .await
            .map_err(Into::into)
    }
}
