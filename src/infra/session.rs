//! Store session shared by the repositories of one unit of work.
//!
//! A [`Session`] pairs the pooled connection with the list of writes staged
//! since the last commit. Nothing in this list touches the store until the
//! owning unit of work flushes it inside a transaction.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityName, EntityTrait, IntoActiveModel,
    IsolationLevel, TransactionTrait,
};

use crate::errors::{AppError, AppResult};

/// Kind of staged mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteKind::Insert => write!(f, "insert"),
            WriteKind::Update => write!(f, "update"),
            WriteKind::Delete => write!(f, "delete"),
        }
    }
}

/// A mutation recorded in memory, applied to the store at commit time.
#[async_trait]
pub(crate) trait PendingWrite: Send + Sync {
    fn kind(&self) -> WriteKind;

    fn table(&self) -> String;

    /// Execute the write inside `txn`
    async fn apply(&self, txn: &DatabaseTransaction) -> AppResult<()>;
}

/// Staged write for any entity, carried as its active model
pub(crate) struct StagedWrite<A> {
    kind: WriteKind,
    model: A,
}

impl<A> StagedWrite<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + Sync + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    pub(crate) fn insert(model: A) -> Box<dyn PendingWrite> {
        Box::new(Self {
            kind: WriteKind::Insert,
            model,
        })
    }

    /// Every column is marked as set, so the row is overwritten as a whole.
    pub(crate) fn update(model: A) -> Box<dyn PendingWrite> {
        Box::new(Self {
            kind: WriteKind::Update,
            model: model.reset_all(),
        })
    }

    pub(crate) fn delete(model: A) -> Box<dyn PendingWrite> {
        Box::new(Self {
            kind: WriteKind::Delete,
            model,
        })
    }
}

#[async_trait]
impl<A> PendingWrite for StagedWrite<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + Sync + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    fn kind(&self) -> WriteKind {
        self.kind
    }

    fn table(&self) -> String {
        A::Entity::default().table_name().to_string()
    }

    async fn apply(&self, txn: &DatabaseTransaction) -> AppResult<()> {
        match self.kind {
            WriteKind::Insert => {
                self.model.clone().insert(txn).await?;
            }
            WriteKind::Update => {
                self.model.clone().update(txn).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => {
                        AppError::stale(format!("update on `{}` matched no row", self.table()))
                    }
                    other => AppError::from(other),
                })?;
            }
            WriteKind::Delete => {
                let result = self.model.clone().delete(txn).await?;
                if result.rows_affected == 0 {
                    return Err(AppError::stale(format!(
                        "delete on `{}` matched no row",
                        self.table()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Connection plus staged writes for one unit of work.
///
/// The staged list sits behind a mutex only so the session is `Sync`; a
/// session is meant to be driven by one caller at a time.
pub struct Session {
    db: DatabaseConnection,
    staged: Mutex<Vec<Box<dyn PendingWrite>>>,
    commit_timeout: Option<Duration>,
}

impl Session {
    pub(crate) fn new(db: DatabaseConnection, commit_timeout: Option<Duration>) -> Self {
        Self {
            db,
            staged: Mutex::new(Vec::new()),
            commit_timeout,
        }
    }

    /// Connection used for reads outside a transaction
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub(crate) fn commit_timeout(&self) -> Option<Duration> {
        self.commit_timeout
    }

    /// Number of writes waiting for the next commit
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn stage(&self, write: Box<dyn PendingWrite>) {
        tracing::debug!(kind = %write.kind(), table = %write.table(), "Staged write");
        self.lock().push(write);
    }

    /// Remove every staged write, returning them in staging order
    pub(crate) fn take_staged(&self) -> Vec<Box<dyn PendingWrite>> {
        std::mem::take(&mut *self.lock())
    }

    /// Put writes back in front of anything staged since they were taken
    pub(crate) fn restore_staged(&self, mut writes: Vec<Box<dyn PendingWrite>>) {
        let mut staged = self.lock();
        writes.append(&mut staged);
        *staged = writes;
    }

    /// Drop every staged write, returning how many were discarded
    pub(crate) fn discard(&self) -> usize {
        let discarded = self.take_staged().len();
        if discarded > 0 {
            tracing::debug!(discarded, "Discarded staged writes");
        }
        discarded
    }

    /// Begin a read-only transaction used to count and fetch a page from
    /// the same snapshot.
    ///
    /// SQLite transactions are serializable and do not accept these options.
    pub(crate) async fn begin_snapshot(&self) -> AppResult<DatabaseTransaction> {
        let (isolation, access) = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => (None, None),
            _ => (
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            ),
        };

        self.db
            .begin_with_config(isolation, access)
            .await
            .map_err(AppError::from)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Box<dyn PendingWrite>>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.db.get_database_backend())
            .field("pending", &self.pending())
            .field("commit_timeout", &self.commit_timeout)
            .finish()
    }
}
