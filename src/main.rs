// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() is fine here: if configuration fails, the app must not start.
    let app_state = AppState::new()
        .await
        .expect("Failed to initialize the application state.");

    // Runs the SQLx migrations on startup
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Failed to run database migrations.");

    tracing::info!("✅ Database migrations applied!");

    // Public authentication routes
    let auth_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/register-admin", post(handlers::auth::register_admin))
        .route("/login", post(handlers::auth::login));

    // User routes (protected by the auth middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Admin review of company applications
    let application_routes = Router::new()
        .route("/", get(handlers::applications::list_applications))
        .route("/{id}", get(handlers::applications::get_application))
        .route("/{id}/approve", post(handlers::applications::approve_application))
        .route("/{id}/reject", post(handlers::applications::reject_application))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let company_routes = Router::new()
        .route("/", get(handlers::companies::list_companies))
        .route("/{id}", get(handlers::companies::get_company))
        .route("/{id}/deactivate", post(handlers::companies::deactivate_company))
        .route("/{id}/reactivate", post(handlers::companies::reactivate_company))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/{id}",
            put(handlers::products::update_product).get(handlers::products::get_product),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route("/receptions", post(handlers::stock::receive_stock))
        .route("/", get(handlers::stock::list_inventory))
        .route("/{product_id}", get(handlers::stock::get_inventory))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::place_order).get(handlers::orders::list_orders),
        )
        .route("/mine", get(handlers::orders::list_my_orders))
        .route("/{id}/status", post(handlers::orders::update_order_status))
        .route("/{id}/cancel", post(handlers::orders::cancel_order))
        .route("/{id}/document", get(handlers::orders::get_order_document))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combine everything into the main router
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/applications", application_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/products", product_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/orders", order_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Start the server
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind the TCP listener");
    tracing::info!("🚀 Server listening on {}", addr);
    axum::serve(listener, app).await.expect("Axum server error");
}
