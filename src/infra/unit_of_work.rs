//! Unit of Work pattern implementation.
//!
//! SOLID (SRP): Manages transaction lifecycle and repository access.
//! DDD: Coordinates operations across multiple aggregates atomically.
//!
//! The Unit of Work pattern:
//! - Owns one store session per request scope
//! - Creates each repository on first access and reuses it afterwards
//! - Collects staged writes from every repository
//! - Flushes them in a single transaction on commit (all or nothing)

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::Serialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::repositories::{CategoryRepository, CategoryStore, ProductRepository, ProductStore};
use super::session::{PendingWrite, Session, WriteKind};
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Counts of rows written by one commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl CommitSummary {
    fn record(&mut self, kind: WriteKind) {
        match kind {
            WriteKind::Insert => self.inserted += 1,
            WriteKind::Update => self.updated += 1,
            WriteKind::Delete => self.deleted += 1,
        }
    }

    /// Total writes applied
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }

    /// True when the commit had nothing to flush
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Unit of Work trait for dependency injection.
///
/// Provides access to the catalog repositories and commits what they staged.
/// One instance serves one logical caller; it must not be driven from
/// several tasks at once.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Category repository, created on first access
    fn categories(&self) -> &dyn CategoryRepository;

    /// Product repository, created on first access
    fn products(&self) -> &dyn ProductRepository;

    /// Writes staged since the last successful commit
    fn pending_changes(&self) -> usize;

    /// Drop every staged write without touching the store
    fn discard_changes(&self) -> usize;

    /// Flush every staged write in one transaction.
    ///
    /// With nothing staged this is a no-op. On failure nothing is persisted
    /// and the staged writes are kept, so the caller can retry or discard.
    async fn commit(&self) -> AppResult<CommitSummary>;

    /// [`commit`](UnitOfWork::commit) that gives up when `cancel` fires.
    ///
    /// Cancellation rolls the transaction back and fails with
    /// [`AppError::Cancelled`]; staged writes are kept.
    async fn commit_with(&self, cancel: &CancellationToken) -> AppResult<CommitSummary>;
}

/// Creates one unit of work per request scope.
#[derive(Clone)]
pub struct UnitOfWorkFactory {
    db: DatabaseConnection,
    commit_timeout: Option<Duration>,
}

impl UnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            commit_timeout: None,
        }
    }

    /// Factory using the commit timeout from configuration
    pub fn from_config(db: DatabaseConnection, config: &Config) -> Self {
        Self::new(db).with_commit_timeout(config.commit_timeout)
    }

    pub fn with_commit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.commit_timeout = timeout;
        self
    }

    /// Start a new unit of work with an empty session
    pub fn create(&self) -> Persistence {
        Persistence::new(Session::new(self.db.clone(), self.commit_timeout))
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    session: Arc<Session>,
    categories: OnceLock<CategoryStore>,
    products: OnceLock<ProductStore>,
}

impl Persistence {
    fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
            categories: OnceLock::new(),
            products: OnceLock::new(),
        }
    }

    /// Release the session, discarding anything still staged.
    ///
    /// Consumes the unit, so repositories borrowed from it cannot be used
    /// afterwards.
    pub fn close(self) -> usize {
        let discarded = self.session.discard();
        if discarded > 0 {
            tracing::warn!(discarded, "Unit of work closed with uncommitted writes");
        }
        discarded
    }

    async fn flush(
        &self,
        pending: &[Box<dyn PendingWrite>],
        cancel: &CancellationToken,
    ) -> AppResult<CommitSummary> {
        let deadline = self.session.commit_timeout().map(|t| Instant::now() + t);

        let txn = guarded(cancel, deadline, self.session.connection().begin()).await?;

        let mut summary = CommitSummary::default();
        for write in pending {
            if let Err(e) = guarded(cancel, deadline, write.apply(&txn)).await {
                tracing::warn!(
                    kind = %write.kind(),
                    table = %write.table(),
                    error = %e,
                    "Staged write failed, rolling back"
                );
                rollback(txn).await;
                return Err(e);
            }
            summary.record(write.kind());
        }

        // Last point at which giving up leaves the store untouched
        if cancel.is_cancelled() {
            rollback(txn).await;
            return Err(AppError::Cancelled);
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(summary)
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn categories(&self) -> &dyn CategoryRepository {
        self.categories.get_or_init(|| {
            tracing::debug!("Creating category repository");
            CategoryStore::new(self.session.clone())
        })
    }

    fn products(&self) -> &dyn ProductRepository {
        self.products.get_or_init(|| {
            tracing::debug!("Creating product repository");
            ProductStore::new(self.session.clone())
        })
    }

    fn pending_changes(&self) -> usize {
        self.session.pending()
    }

    fn discard_changes(&self) -> usize {
        self.session.discard()
    }

    async fn commit(&self) -> AppResult<CommitSummary> {
        self.commit_with(&CancellationToken::new()).await
    }

    async fn commit_with(&self, cancel: &CancellationToken) -> AppResult<CommitSummary> {
        let pending = self.session.take_staged();
        if pending.is_empty() {
            tracing::debug!("Nothing staged, skipping commit");
            return Ok(CommitSummary::default());
        }

        match self.flush(&pending, cancel).await {
            Ok(summary) => {
                tracing::info!(
                    inserted = summary.inserted,
                    updated = summary.updated,
                    deleted = summary.deleted,
                    "Committed unit of work"
                );
                Ok(summary)
            }
            Err(e) => {
                self.session.restore_staged(pending);
                Err(e)
            }
        }
    }
}

impl Drop for Persistence {
    fn drop(&mut self) {
        let pending = self.session.pending();
        if pending > 0 {
            tracing::warn!(pending, "Unit of work dropped with uncommitted writes");
        }
    }
}

/// Run `fut` unless `cancel` fires or `deadline` passes first.
async fn guarded<F, T, E>(
    cancel: &CancellationToken,
    deadline: Option<Instant>,
    fut: F,
) -> AppResult<T>
where
    F: Future<Output = Result<T, E>>,
    AppError: From<E>,
{
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    // A spent deadline fails before `fut` gets a chance to run
    if deadline.is_some_and(|deadline| deadline <= Instant::now()) {
        return Err(AppError::Timeout);
    }

    let expired = async {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        _ = expired => Err(AppError::Timeout),
        result = fut => result.map_err(AppError::from),
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(rollback_err) = txn.rollback().await {
        tracing::error!("Transaction rollback failed: {}", rollback_err);
    }
}
