//!
//! FMEA record-keeping service.
//! Reads configuration from TOML file (~/.config/fmea-service/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use fmea_service::auth::jwt::JwtConfig;
use fmea_service::auth::{AuthService, SessionRegistry};
use fmea_service::domain::{
    CreateUserData, EntryStatus, NewEntry, RepositoryProvider, UserRole,
};
use fmea_service::infrastructure::database::migrator::Migrator;
use fmea_service::infrastructure::database::repositories::{clone_connection, SeaOrmUserRepository};
use fmea_service::{
    create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FMEA_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting FMEA service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories & seed data ───────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(clone_connection(&db)));

    seed_default_users(repos.as_ref(), &app_cfg).await;
    if app_cfg.seed.demo_entries {
        seed_demo_entries(repos.as_ref(), &app_cfg).await;
    }

    // ── Auth ───────────────────────────────────────────────────
    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "fmea-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    let sessions = SessionRegistry::shared();
    let users = Arc::new(SeaOrmUserRepository::new(clone_connection(&db)));
    let auth_service = Arc::new(AuthService::new(users, jwt_config.clone(), sessions.clone()));

    // ── REST API ───────────────────────────────────────────────
    let api_router = create_api_router(repos, auth_service, sessions, jwt_config);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);
    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 FMEA service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("🛑 Shutdown signal received");
}

/// Create the two fixed seed accounts if no users exist
async fn seed_default_users(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let users = repos.users();
    let count = users.count().await.unwrap_or(0);
    if count > 0 {
        return;
    }

    info!("No accounts found, creating seed users...");

    let seeds = [
        (
            app_cfg.seed.admin_username.clone(),
            app_cfg.seed.admin_password.clone(),
            UserRole::Admin,
        ),
        (
            app_cfg.seed.user_username.clone(),
            app_cfg.seed.user_password.clone(),
            UserRole::User,
        ),
    ];

    for (username, password, role) in seeds {
        match users
            .create_user(CreateUserData {
                username: username.clone(),
                password,
                role,
            })
            .await
        {
            Ok(user) => info!("Seed user created: {} ({})", user.username, user.role),
            Err(e) => error!("Failed to create seed user {}: {}", username, e),
        }
    }

    info!("⚠️  Please change the seed passwords immediately!");
}

/// Insert a handful of demo FMEA entries when the store is empty
async fn seed_demo_entries(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let entries = repos.entries();
    if entries.count().await.unwrap_or(0) > 0 {
        return;
    }

    let admin = match repos
        .users()
        .find_by_username(&app_cfg.seed.admin_username)
        .await
    {
        Ok(Some(admin)) => admin,
        _ => {
            warn!("Demo entries skipped: admin account not found");
            return;
        }
    };

    info!("Inserting demo FMEA entries...");

    let samples = [
        NewEntry {
            function: "Motor starten".to_string(),
            failure_mode: "Motor startet nicht".to_string(),
            failure_effect: "System funktioniert nicht, Produktionsausfall".to_string(),
            severity: 8,
            failure_cause: "Defekte Zündkerze, leere Batterie".to_string(),
            occurrence: 3,
            test_method: "Visuelle Prüfung, Spannungsmessung".to_string(),
            detection: 2,
            actions: Some("Wartungsplan erstellen, Ersatzteile bevorraten".to_string()),
            status: EntryStatus::Open,
            created_by: admin.id.clone(),
        },
        NewEntry {
            function: "Bremssystem".to_string(),
            failure_mode: "Bremsen versagen".to_string(),
            failure_effect: "Sicherheitsrisiko, mögliche Unfälle".to_string(),
            severity: 10,
            failure_cause: "Verschlissene Bremsbeläge, Leckage im System".to_string(),
            occurrence: 2,
            test_method: "Regelmäßige Inspektion, Bremstest".to_string(),
            detection: 3,
            actions: Some("Präventive Wartung alle 6 Monate".to_string()),
            status: EntryStatus::InProgress,
            created_by: admin.id.clone(),
        },
        NewEntry {
            function: "Temperaturregelung".to_string(),
            failure_mode: "Überhitzung".to_string(),
            failure_effect: "Komponentenschäden, Systemausfall".to_string(),
            severity: 7,
            failure_cause: "Defekter Temperatursensor, verstopfter Filter".to_string(),
            occurrence: 4,
            test_method: "Temperaturüberwachung, Sensorkalibrierung".to_string(),
            detection: 4,
            actions: Some("Redundante Sensoren installieren".to_string()),
            status: EntryStatus::Completed,
            created_by: admin.id.clone(),
        },
    ];

    for sample in samples {
        if let Err(e) = entries.create(sample).await {
            error!("Failed to insert demo entry: {}", e);
        }
    }
}
