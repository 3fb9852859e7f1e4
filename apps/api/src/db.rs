use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool without connecting.
///
/// Connections are opened on first use, so the service starts even when the
/// database is down; each request then reports its own connection failure.
pub fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(database_url)?;

    info!("PostgreSQL pool configured (connections open lazily)");
    Ok(pool)
}
