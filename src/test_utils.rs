use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use axum_test::TestServer;
use chrono::NaiveDate;
use model::entities::forecast;
use schema::ensure_schema_at;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Reference date used for seed rows in tests.
pub fn seed_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

/// In-memory SQLite database bootstrapped like a fresh deployment (two seed rows).
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    ensure_schema_at(&db, seed_reference_date())
        .await
        .expect("Failed to bootstrap schema");

    db
}

/// In-memory SQLite database with an empty forecast table.
pub async fn setup_empty_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(forecast::Entity);
    db.execute(backend.build(&stmt))
        .await
        .expect("Failed to create forecast table");

    db
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level comes from RUST_LOG and defaults to WARN.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

pub fn test_app(db: DatabaseConnection) -> Router {
    create_router(AppState { db }, None)
}

/// Test server over the seeded database.
pub async fn setup_test_server() -> TestServer {
    let _guard = init_test_tracing();
    TestServer::new(test_app(setup_test_db().await)).expect("Failed to start test server")
}

/// Test server over an empty forecast table, plus the handle to inspect it.
pub async fn setup_empty_test_server() -> (TestServer, DatabaseConnection) {
    let _guard = init_test_tracing();
    let db = setup_empty_test_db().await;
    let server = TestServer::new(test_app(db.clone())).expect("Failed to start test server");
    (server, db)
}
