use std::process;
use std::sync::Arc;

use auth::Authenticator;
use auth::KeyMaterial;
use axum::Router;
use credential_service::config::Config;
use credential_service::config::PolicyConfig;
use credential_service::domain::user::policy::UsernamePolicy;
use credential_service::domain::user::ports::UserRepository;
use credential_service::domain::user::service::UserService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryUserRepository;
use credential_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Exit status when signing keys cannot be loaded.
const EXIT_KEY_MATERIAL_MISSING: i32 = 1;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "credential_service=debug,auth=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        keys_directory = %config.keys.directory.display(),
        policy_file = %config.policy.file.display(),
        database = config.database.is_some(),
        "Configuration loaded"
    );

    // Refuse to start without signing capability
    let key_material = match KeyMaterial::load(&config.keys.directory) {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!(error = %e, "Signing key material unavailable");
            process::exit(EXIT_KEY_MATERIAL_MISSING);
        }
    };
    let authenticator = match Authenticator::new(&key_material) {
        Ok(authenticator) => Arc::new(authenticator),
        Err(e) => {
            tracing::error!(error = %e, "Signing key material invalid");
            process::exit(EXIT_KEY_MATERIAL_MISSING);
        }
    };
    tracing::info!("Signing keys loaded");

    let policy = PolicyConfig::load(&config.policy.file)?;
    let username_policy = policy.username_policy()?;
    tracing::info!(
        username_allowed_regex = %policy.username_allowed_regex,
        username_reserved_regex = %policy.username_reserved_regex,
        token_lifetime = policy.token_lifetime,
        "Policy loaded"
    );

    let http_application = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_application(
                PostgresUserRepository::new(pg_pool),
                authenticator,
                username_policy,
                policy.token_lifetime,
            )
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            build_application(
                InMemoryUserRepository::new(),
                authenticator,
                username_policy,
                policy.token_lifetime,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_application<UR: UserRepository>(
    repository: UR,
    authenticator: Arc<Authenticator>,
    username_policy: UsernamePolicy,
    token_lifetime: i64,
) -> Router {
    let user_service = UserService::new(
        Arc::new(repository),
        authenticator,
        username_policy,
        token_lifetime,
    );
    create_router(Arc::new(user_service))
}
