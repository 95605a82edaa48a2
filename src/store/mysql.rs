use super::{Collection, Store, StoreResult};
use crate::model::{
    city::{City, NewCity},
    result::{ContributionResult, NewResult},
    salary::{NewSalary, Salary},
};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

/// MySQL keeps at most 65535 placeholders per statement.
const INSERT_CHUNK: usize = 1000;

// Text keys sort by code point, the same order MemoryStore and `calculate` use,
// regardless of the table's default collation.
const SELECT_SALARIES: &str = r#"
    SELECT id, employee_id, employee_name, month, salary_amount
    FROM salaries
    ORDER BY month COLLATE utf8mb4_bin ASC, id ASC
"#;

const SELECT_RESULTS: &str = r#"
    SELECT id, employee_name, avg_salary, contribution_base, company_fee
    FROM results
    ORDER BY employee_name COLLATE utf8mb4_bin ASC
"#;

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn select_cities(&self) -> StoreResult<Vec<City>> {
        let rows = sqlx::query_as::<_, City>(
            r#"SELECT id, city_name, year, base_min, base_max, rate FROM cities ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_cities(&self, rows: &[NewCity]) -> StoreResult<()> {
        for chunk in rows.chunks(INSERT_CHUNK) {
            let mut qb: QueryBuilder<MySql> =
                QueryBuilder::new("INSERT INTO cities (city_name, year, base_min, base_max, rate) ");
            qb.push_values(chunk, |mut b, c| {
                b.push_bind(&c.city_name)
                    .push_bind(&c.year)
                    .push_bind(c.base_min)
                    .push_bind(c.base_max)
                    .push_bind(c.rate);
            });
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn select_salaries(&self) -> StoreResult<Vec<Salary>> {
        let rows = sqlx::query_as::<_, Salary>(SELECT_SALARIES)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_salaries(&self, rows: &[NewSalary]) -> StoreResult<()> {
        for chunk in rows.chunks(INSERT_CHUNK) {
            let mut qb: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO salaries (employee_id, employee_name, month, salary_amount) ",
            );
            qb.push_values(chunk, |mut b, s| {
                b.push_bind(&s.employee_id)
                    .push_bind(&s.employee_name)
                    .push_bind(&s.month)
                    .push_bind(s.salary_amount);
            });
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn select_results(&self) -> StoreResult<Vec<ContributionResult>> {
        let rows = sqlx::query_as::<_, ContributionResult>(SELECT_RESULTS)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_results(&self, rows: &[NewResult]) -> StoreResult<()> {
        for chunk in rows.chunks(INSERT_CHUNK) {
            let mut qb: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO results (employee_name, avg_salary, contribution_base, company_fee) ",
            );
            qb.push_values(chunk, |mut b, r| {
                b.push_bind(&r.employee_name)
                    .push_bind(r.avg_salary)
                    .push_bind(r.contribution_base)
                    .push_bind(r.company_fee);
            });
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> StoreResult<()> {
        // Table names come from the enum, never from input.
        sqlx::query(&format!("DELETE FROM {collection}"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
