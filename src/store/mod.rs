//! Row-store abstraction over the three collections the service keeps.
//!
//! Backends only provide select / insert / delete-all. Replacing a
//! collection is a clear followed by an insert and is not atomic.

pub mod memory;
pub mod mysql;

use crate::model::{
    city::{City, NewCity},
    result::{ContributionResult, NewResult},
    salary::{NewSalary, Salary},
};
use async_trait::async_trait;
use derive_more::{Display, Error, From};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Cities,
    Salaries,
    Results,
}

#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn select_cities(&self) -> StoreResult<Vec<City>>;
    async fn insert_cities(&self, rows: &[NewCity]) -> StoreResult<()>;

    /// Ordered by month, ascending, comparing code points.
    async fn select_salaries(&self) -> StoreResult<Vec<Salary>>;
    async fn insert_salaries(&self, rows: &[NewSalary]) -> StoreResult<()>;

    /// Ordered by employee name, ascending, comparing code points.
    async fn select_results(&self) -> StoreResult<Vec<ContributionResult>>;
    async fn insert_results(&self, rows: &[NewResult]) -> StoreResult<()>;

    async fn clear(&self, collection: Collection) -> StoreResult<()>;

    async fn replace_cities(&self, rows: &[NewCity]) -> StoreResult<()> {
        self.clear(Collection::Cities).await?;
        self.insert_cities(rows).await
    }

    async fn replace_salaries(&self, rows: &[NewSalary]) -> StoreResult<()> {
        self.clear(Collection::Salaries).await?;
        self.insert_salaries(rows).await
    }

    async fn replace_results(&self, rows: &[NewResult]) -> StoreResult<()> {
        self.clear(Collection::Results).await?;
        self.insert_results(rows).await
    }
}
