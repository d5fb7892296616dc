//! Store-backed pagination.

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Select};

use crate::errors::AppResult;
use crate::types::{PageRequest, PagedList};

/// Count `query`, then fetch the requested page of it.
///
/// `query` must already be ordered; rows come back in that order. A page past
/// the end costs only the count. Run this on a transaction when count and
/// fetch have to agree.
pub async fn paginate<E, C>(
    query: Select<E>,
    db: &C,
    request: &PageRequest,
) -> AppResult<PagedList<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    request.validate()?;

    let paginator = query.paginate(db, request.page_size);
    let total = paginator.num_items().await?;

    let items = match request.offset() {
        Some(offset) if offset < total => paginator.fetch_page(request.page_number - 1).await?,
        _ => Vec::new(),
    };

    tracing::debug!(
        total,
        page = request.page_number,
        size = request.page_size,
        returned = items.len(),
        "Fetched page"
    );

    Ok(PagedList::new(items, total, request))
}
