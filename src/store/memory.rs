use super::{Collection, Store, StoreResult};
use crate::model::{
    city::{City, NewCity},
    result::{ContributionResult, NewResult},
    salary::{NewSalary, Salary},
};
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Default)]
struct Tables {
    next_id: u64,
    cities: Vec<City>,
    salaries: Vec<Salary>,
    results: Vec<ContributionResult>,
}

impl Tables {
    fn take_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store. Ids keep growing across clears, like an
/// auto-increment column.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select_cities(&self) -> StoreResult<Vec<City>> {
        Ok(self.tables.read().cities.clone())
    }

    async fn insert_cities(&self, rows: &[NewCity]) -> StoreResult<()> {
        let mut tables = self.tables.write();
        for row in rows {
            let id = tables.take_id();
            tables.cities.push(row.clone().with_id(id));
        }
        Ok(())
    }

    async fn select_salaries(&self) -> StoreResult<Vec<Salary>> {
        let mut rows = self.tables.read().salaries.clone();
        rows.sort_by(|a, b| a.month.cmp(&b.month));
        Ok(rows)
    }

    async fn insert_salaries(&self, rows: &[NewSalary]) -> StoreResult<()> {
        let mut tables = self.tables.write();
        for row in rows {
            let id = tables.take_id();
            tables.salaries.push(row.clone().with_id(id));
        }
        Ok(())
    }

    async fn select_results(&self) -> StoreResult<Vec<ContributionResult>> {
        let mut rows = self.tables.read().results.clone();
        rows.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
        Ok(rows)
    }

    async fn insert_results(&self, rows: &[NewResult]) -> StoreResult<()> {
        let mut tables = self.tables.write();
        for row in rows {
            let id = tables.take_id();
            tables.results.push(row.clone().with_id(id));
        }
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> StoreResult<()> {
        let mut tables = self.tables.write();
        match collection {
            Collection::Cities => tables.cities.clear(),
            Collection::Salaries => tables.salaries.clear(),
            Collection::Results => tables.results.clear(),
        }
        Ok(())
    }
}
