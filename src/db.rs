use anyhow::Context;
use sqlx::MySqlPool;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS cities (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        city_name VARCHAR(255) NOT NULL,
        year VARCHAR(32) NOT NULL,
        base_min DOUBLE NOT NULL,
        base_max DOUBLE NOT NULL,
        rate DOUBLE NOT NULL
    ) CHARACTER SET utf8mb4
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS salaries (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id VARCHAR(255) NOT NULL,
        employee_name VARCHAR(255) NOT NULL,
        month VARCHAR(32) NOT NULL,
        salary_amount DOUBLE NOT NULL
    ) CHARACTER SET utf8mb4
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS results (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_name VARCHAR(255) NOT NULL,
        avg_salary DOUBLE NOT NULL,
        contribution_base DOUBLE NOT NULL,
        company_fee DOUBLE NOT NULL
    ) CHARACTER SET utf8mb4
    "#,
];

pub async fn init_db(database_url: &str) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    for ddl in SCHEMA {
        sqlx::query(ddl)
            .execute(&pool)
            .await
            .context("Failed to create tables")?;
    }

    Ok(pool)
}
