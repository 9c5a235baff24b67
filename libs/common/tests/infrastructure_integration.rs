//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is properly configured
//! and accessible from the application. They are skipped when no
//! `DATABASE_URL` is provided so the suite stays runnable without a live
//! database.

use common::database::{DatabaseConfig, health_check, init_pool};
use sqlx::Row;

#[tokio::test]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("skipping infrastructure test: DATABASE_URL not set");
        return Ok(());
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;

    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    Ok(())
}
