use crate::service::payos::PayOsClient;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXJhbmRvbXNhbHQ$Vv4Ch2Y1G5oO0DRQ5sZ8vNB7sQhS1bY2UQpZl7i6uEo";

/// Runtime configuration read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub argon_pepper: String,
    pub dummy_hashed_password: String,
    pub google_client_id: String,
    pub payos_client_id: String,
    pub payos_api_key: String,
    pub payos_checksum_key: String,
    pub payos_base_url: String,
    pub payos_return_url: String,
    pub payos_cancel_url: String,
    pub frontend_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `DATABASE_URL` or `JWT_SECRET` is not set.
    pub fn from_env() -> Self {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| "8080".to_string());
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60 * 60 * 24),
            argon_pepper: env::var("ARGON_PEPPER").unwrap_or_default(),
            dummy_hashed_password: env::var("DUMMY_HASHED_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_DUMMY_HASH.to_string()),
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            payos_client_id: env::var("PAYOS_CLIENT_ID").unwrap_or_default(),
            payos_api_key: env::var("PAYOS_API_KEY").unwrap_or_default(),
            payos_checksum_key: env::var("PAYOS_CHECKSUM_KEY").unwrap_or_default(),
            payos_base_url: env::var("PAYOS_BASE_URL")
                .unwrap_or_else(|_| "https://api-merchant.payos.vn".to_string()),
            payos_return_url: env::var("PAYOS_RETURN_URL").unwrap_or_else(|_| {
                format!("http://localhost:{}/payments/payos/return", server_port)
            }),
            payos_cancel_url: env::var("PAYOS_CANCEL_URL").unwrap_or_else(|_| {
                format!("http://localhost:{}/payments/payos/return", server_port)
            }),
            frontend_url,
            server_port,
        }
    }

    /// Server address in the format `host:port`.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Initializes the application state by creating the PostgreSQL connection pool.
///
/// # Returns
/// An `Arc<AppState>` shared by every handler for the lifetime of the process.
///
/// # Panics
/// This function will panic if it fails to create the database connection pool
/// or to apply pending migrations.
pub async fn initialize_app_state(config: &AppConfig) -> Arc<AppState> {
    // Setup connection pool.
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database_url)
        .await
        .unwrap_or_else(|e| panic!("Failed to create database connection pool: {}", e));

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to run database migrations: {}", e));
        info!("Database migrations applied");
    }

    Arc::new(AppState::new(config, pg_pool))
}

pub struct AppState {
    pub pg_pool: PgPool,
    pub jwt_secret: SecretString,
    pub jwt_expiration: u64,
    pub argon_pepper: SecretString,
    pub dummy_hashed_password: SecretString,
    pub google_client_id: String,
    pub payos: PayOsClient,
    pub frontend_url: String,
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Assembles the state around an existing pool.
    pub fn new(config: &AppConfig, pg_pool: PgPool) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            pg_pool,
            jwt_secret: config.jwt_secret.clone().into(),
            jwt_expiration: config.jwt_expiration,
            argon_pepper: config.argon_pepper.clone().into(),
            dummy_hashed_password: config.dummy_hashed_password.clone().into(),
            google_client_id: config.google_client_id.clone(),
            payos: PayOsClient::new(config, http_client.clone()),
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }
}
