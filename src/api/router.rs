//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{actions, auth, entries, health, reports};
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::auth::{AuthService, SharedSessionRegistry};
use crate::domain::{AccessGate, RepositoryProvider};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::logout,
        auth::get_current_user,
        // Entries
        entries::list_entries,
        entries::get_entry,
        entries::create_entry,
        entries::update_entry,
        entries::delete_entry,
        // Actions
        actions::list_actions,
        actions::create_action,
        actions::update_action,
        actions::delete_action,
        // Reports
        reports::export_csv,
        reports::get_statistics,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Entries
            entries::EntryResponse,
            entries::CreateEntryRequest,
            entries::UpdateEntryRequest,
            // Actions
            actions::ActionResponse,
            actions::CreateActionRequest,
            actions::UpdateActionRequest,
            // Reports
            reports::StatisticsResponse,
            reports::RiskCounts,
            reports::StatusCounts,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Verfügbarkeitsprüfung für Monitoring."),
        (name = "Authentication", description = "An- und Abmeldung. Das Token aus `login` wird im Header `Authorization: Bearer <token>` mitgeschickt; `logout` macht es ungültig."),
        (name = "Entries", description = "FMEA-Einträge: Funktion, Fehlerart, Fehlerursache, Fehlerfolge und die drei Bewertungen (Bedeutung, Auftreten, Entdeckung, je 1-10). RPZ = Bedeutung × Auftreten × Entdeckung und die Risikostufe (`high` > 100, `medium` 51-100, sonst `low`) werden bei jedem Lesen neu berechnet. Löschen nur für Administratoren."),
        (name = "Actions", description = "Abstellmaßnahmen zu FMEA-Einträgen, inklusive Umsetzungsnachweis und neuer RPZ nach Maßnahme. Nur für Administratoren."),
        (name = "Reports", description = "CSV-Export (Semikolon-getrennt, deutsche Spaltenüberschriften) und Kennzahlen über alle Einträge."),
    ),
    info(
        title = "FMEA Service API",
        version = "1.0.0",
        description = "REST API für die Verwaltung von FMEA-Einträgen (Fehlermöglichkeits- und Einflussanalyse).

## Authentifizierung

Token über `POST /api/v1/auth/login` beziehen und als `Authorization: Bearer <token>` mitschicken.
Die Sitzung endet mit `POST /api/v1/auth/logout` oder nach Ablauf des Tokens.

## Format der Antworten

Alle REST-Antworten sind in die Standardhülle verpackt:
```json
{\"success\": true, \"data\": {...}}
```

Im Fehlerfall:
```json
{\"success\": false, \"error\": \"Beschreibung\"}
```
",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    auth_service: Arc<AuthService>,
    sessions: SharedSessionRegistry,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config,
        sessions,
    };

    let gate: Arc<dyn AccessGate> = auth_service.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_state = auth::AuthHandlerState {
        auth: auth_service,
        repos: repos.clone(),
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Entry routes (protected; delete checks the admin role via the gate)
    let entries_state = entries::EntriesState {
        repos: repos.clone(),
        gate,
    };
    let entry_routes = Router::new()
        .route("/", get(entries::list_entries).post(entries::create_entry))
        .route(
            "/{id}",
            get(entries::get_entry)
                .put(entries::update_entry)
                .delete(entries::delete_entry),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(entries_state);

    // Action routes (admin only)
    let actions_state = actions::ActionsState {
        repos: repos.clone(),
    };
    let action_routes = Router::new()
        .route("/", get(actions::list_actions).post(actions::create_action))
        .route(
            "/{id}",
            put(actions::update_action).delete(actions::delete_action),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(actions_state);

    // Export and statistics (protected)
    let reports_state = reports::ReportsState { repos };
    let report_routes = Router::new()
        .route("/api/v1/export", get(reports::export_csv))
        .route("/api/v1/statistics", get(reports::get_statistics))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(reports_state);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Entries
        .nest("/api/v1/entries", entry_routes)
        // Actions
        .nest("/api/v1/actions", action_routes)
        // Reports
        .merge(report_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
