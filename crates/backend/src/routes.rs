use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::system;
use crate::system::auth::middleware::{require_admin, require_auth};

/// All application routes. Catalog reads are public, mutations require
/// a valid token, user management and settings writes require admin.
pub fn configure_routes() -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .merge(admin_routes())
        .layer(CorsLayer::permissive())
}

fn public_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/auth/register", post(system::handlers::auth::register))
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route(
            "/api/auth/admin/login",
            post(system::handlers::auth::admin_login),
        )
        .route(
            "/api/auth/forgot-password",
            post(system::handlers::auth::forgot_password),
        )
        .route(
            "/api/auth/reset-password/:token",
            patch(system::handlers::auth::reset_password),
        )
        .route("/api/categories", get(handlers::a001_category::list))
        .route("/api/categories/:id", get(handlers::a001_category::get))
        .route("/api/components", get(handlers::a002_component::list))
        .route(
            "/api/components/brands",
            get(handlers::a002_component::list_brands),
        )
        .route("/api/components/:id", get(handlers::a002_component::get))
        .route("/api/prebuild-pcs", get(handlers::a003_prebuild_pc::list))
        .route(
            "/api/prebuild-pcs/build/components/:category_id",
            get(handlers::a003_prebuild_pc::components_for_slot),
        )
        .route("/api/prebuild-pcs/:id", get(handlers::a003_prebuild_pc::get))
        .route(
            "/api/user-builds",
            get(handlers::a004_user_build::list).post(handlers::a004_user_build::create),
        )
        .route(
            "/api/user-builds/:id",
            get(handlers::a004_user_build::get)
                .put(handlers::a004_user_build::update)
                .delete(handlers::a004_user_build::delete),
        )
        .route(
            "/api/compatibility-rules",
            get(handlers::a005_compatibility_rule::list),
        )
        .route(
            "/api/compatibility-rules/check",
            post(handlers::a005_compatibility_rule::check),
        )
        .route(
            "/api/compatibility-rules/:id",
            get(handlers::a005_compatibility_rule::get),
        )
        .route("/api/settings", get(handlers::settings::get))
}

fn protected_routes() -> Router {
    Router::new()
        .route("/api/auth/me", get(system::handlers::auth::current_user))
        .route("/api/categories", post(handlers::a001_category::create))
        .route(
            "/api/categories/:id",
            put(handlers::a001_category::update).delete(handlers::a001_category::delete),
        )
        .route(
            "/api/categories/:id/fields",
            post(handlers::a001_category::add_field),
        )
        .route(
            "/api/categories/:id/fields/:field_id",
            put(handlers::a001_category::update_field)
                .delete(handlers::a001_category::remove_field),
        )
        .route("/api/components", post(handlers::a002_component::create))
        .route(
            "/api/components/:id",
            put(handlers::a002_component::update).delete(handlers::a002_component::delete),
        )
        .route("/api/prebuild-pcs", post(handlers::a003_prebuild_pc::create))
        .route(
            "/api/prebuild-pcs/:id",
            put(handlers::a003_prebuild_pc::update).delete(handlers::a003_prebuild_pc::delete),
        )
        .route(
            "/api/compatibility-rules",
            post(handlers::a005_compatibility_rule::create),
        )
        .route(
            "/api/compatibility-rules/:id",
            put(handlers::a005_compatibility_rule::update)
                .delete(handlers::a005_compatibility_rule::delete),
        )
        .route(
            "/api/suppliers",
            get(handlers::a006_supplier::list).post(handlers::a006_supplier::create),
        )
        .route("/api/suppliers/import", post(handlers::a006_supplier::import))
        .route(
            "/api/suppliers/:id",
            get(handlers::a006_supplier::get)
                .put(handlers::a006_supplier::update)
                .delete(handlers::a006_supplier::delete),
        )
        .route(
            "/api/suppliers/:id/comments",
            post(handlers::a006_supplier::add_comment),
        )
        .route(
            "/api/suppliers/:id/ratings",
            post(handlers::a006_supplier::add_rating),
        )
        .route(
            "/api/suppliers/:id/products",
            post(handlers::a006_supplier::set_product_price),
        )
        .route(
            "/api/products",
            get(handlers::a007_product::list).post(handlers::a007_product::create),
        )
        .route(
            "/api/products/:id",
            get(handlers::a007_product::get)
                .put(handlers::a007_product::update)
                .delete(handlers::a007_product::delete),
        )
        .route(
            "/api/orders",
            get(handlers::a008_order::list).post(handlers::a008_order::create),
        )
        .route("/api/orders/analytics", get(handlers::a008_order::analytics))
        .route(
            "/api/orders/product/:id/suppliers",
            get(handlers::a008_order::product_offers),
        )
        .route(
            "/api/orders/:id",
            get(handlers::a008_order::get)
                .put(handlers::a008_order::update)
                .delete(handlers::a008_order::cancel),
        )
        .route(
            "/api/orders/:id/status",
            patch(handlers::a008_order::update_status),
        )
        .route_layer(middleware::from_fn(require_auth))
}

fn admin_routes() -> Router {
    Router::new()
        .route("/api/users", get(system::handlers::users::list_users))
        .route(
            "/api/users/:id",
            get(system::handlers::users::get_user)
                .patch(system::handlers::users::update_user)
                .delete(system::handlers::users::delete_user),
        )
        .route("/api/settings", put(handlers::settings::update))
        .route_layer(middleware::from_fn(require_admin))
}
