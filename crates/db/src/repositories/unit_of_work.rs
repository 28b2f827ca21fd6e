//! Transaction-scoped aggregation of the repositories.

use sqlx::{PgPool, Postgres, Transaction};

use super::category_repo::CategoryRepo;
use super::generic::Repository;
use super::product_repo::ProductRepo;

/// One atomic unit of work: every repository handed out shares a single
/// transaction.
///
/// Changes become durable only through [`UnitOfWork::complete`]. Dropping a
/// unit of work without completing it rolls every staged change back.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
    staged: u64,
}

impl UnitOfWork {
    /// Open a transaction on `pool`.
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;
        Ok(Self { tx, staged: 0 })
    }

    pub fn categories(&mut self) -> CategoryRepo<'_> {
        Repository::new(&mut self.tx, &mut self.staged)
    }

    pub fn products(&mut self) -> ProductRepo<'_> {
        Repository::new(&mut self.tx, &mut self.staged)
    }

    /// Number of row changes staged so far.
    pub fn staged(&self) -> u64 {
        self.staged
    }

    /// Commit every staged change and return how many rows were affected.
    ///
    /// Constraint violations deferred to commit time surface here as
    /// `sqlx::Error::Database`.
    pub async fn complete(self) -> Result<u64, sqlx::Error> {
        self.tx.commit().await?;
        tracing::debug!(rows = self.staged, "Unit of work committed");
        Ok(self.staged)
    }
}
