use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::{auth_handlers, handlers, registry_handlers, AppContext};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<AppContext<S>>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Authentication
        .route("/auth/register", post(auth_handlers::register::<S>))
        .route("/auth/login", post(auth_handlers::login::<S>))
        .route("/auth/logout", post(auth_handlers::logout::<S>))
        .route("/auth/me", get(auth_handlers::me))
        // Passkey credentials
        .route(
            "/auth/passkeys/begin",
            post(auth_handlers::begin_passkey_registration::<S>),
        )
        .route(
            "/auth/passkeys/complete",
            post(auth_handlers::complete_passkey_registration::<S>),
        )
        .route("/auth/passkeys", get(auth_handlers::list_passkeys::<S>))
        .route(
            "/auth/passkeys/:id",
            delete(auth_handlers::revoke_passkey::<S>),
        )
        // Artist roster
        .route("/artists", get(handlers::list_artists::<S>))
        .route("/artists", post(handlers::create_artist::<S>))
        .route("/artists/:id", get(handlers::get_artist::<S>))
        .route("/artists/:id", patch(handlers::update_artist::<S>))
        .route("/artists/:id", delete(handlers::delete_artist::<S>))
        .route(
            "/artists/:id/royalties",
            get(handlers::artist_royalty_summary::<S>),
        )
        .route(
            "/artists/:id/statement",
            get(handlers::artist_royalty_statement::<S>),
        )
        // Contracts
        .route("/contracts", get(handlers::list_contracts::<S>))
        .route("/contracts", post(handlers::create_contract::<S>))
        .route("/contracts/:id", get(handlers::get_contract::<S>))
        .route("/contracts/:id", patch(handlers::update_contract::<S>))
        .route("/contracts/:id", delete(handlers::delete_contract::<S>))
        // Demo submissions
        .route("/demos", get(handlers::list_demos::<S>))
        .route("/demos", post(handlers::create_demo::<S>))
        .route("/demos/:id", get(handlers::get_demo::<S>))
        .route("/demos/:id", patch(handlers::update_demo::<S>))
        .route("/demos/:id", delete(handlers::delete_demo::<S>))
        // Licenses
        .route("/licenses", get(handlers::list_licenses::<S>))
        .route("/licenses", post(handlers::create_license::<S>))
        .route("/licenses/dashboard", get(handlers::license_dashboard::<S>))
        .route("/licenses/:id", get(handlers::get_license::<S>))
        .route("/licenses/:id", patch(handlers::update_license::<S>))
        .route("/licenses/:id", delete(handlers::delete_license::<S>))
        // Product catalog
        .route("/products", get(handlers::list_products::<S>))
        .route("/products", post(handlers::create_product::<S>))
        .route("/products/:id", get(handlers::get_product::<S>))
        .route("/products/:id", patch(handlers::update_product::<S>))
        .route("/products/:id", delete(handlers::delete_product::<S>))
        .route(
            "/products/:id/register",
            post(registry_handlers::register_product::<S>),
        )
        .route(
            "/products/:id/registration",
            get(registry_handlers::product_registration_status::<S>),
        )
        // Locations
        .route("/locations", get(handlers::list_locations::<S>))
        .route("/locations", post(handlers::create_location::<S>))
        .route("/locations/:id", get(handlers::get_location::<S>))
        .route("/locations/:id", patch(handlers::update_location::<S>))
        .route("/locations/:id", delete(handlers::delete_location::<S>))
        // IPI records
        .route("/ipi", get(handlers::list_ipi_records::<S>))
        .route("/ipi", post(handlers::create_ipi_record::<S>))
        .route("/ipi/:id", get(handlers::get_ipi_record::<S>))
        .route("/ipi/:id", patch(handlers::update_ipi_record::<S>))
        .route("/ipi/:id", delete(handlers::delete_ipi_record::<S>))
        // Industry partners
        .route("/partners", get(handlers::list_partners::<S>))
        .route("/partners", post(handlers::create_partner::<S>))
        .route(
            "/partners/ddex/parties",
            get(registry_handlers::ddex_parties),
        )
        .route("/partners/:id", get(handlers::get_partner::<S>))
        .route("/partners/:id", patch(handlers::update_partner::<S>))
        .route("/partners/:id", delete(handlers::delete_partner::<S>))
        .route("/partners/:id/feed", get(registry_handlers::partner_feed::<S>))
        // Payments
        .route("/payments", get(handlers::list_payments::<S>))
        .route("/payments", post(handlers::create_payment::<S>))
        .route("/payments/:id", get(handlers::get_payment::<S>))
        .route("/payments/:id", patch(handlers::update_payment::<S>))
        .route("/payments/:id", delete(handlers::delete_payment::<S>))
        .route(
            "/payments/:id/submit",
            post(registry_handlers::submit_payment::<S>),
        )
        .route(
            "/payments/:id/status",
            get(registry_handlers::payment_status::<S>),
        )
        // GS1 identifier utilities
        .route(
            "/gs1/check-digit",
            post(registry_handlers::compute_check_digit),
        )
        .route("/gs1/validate", post(registry_handlers::validate_identifier))
        .layer(CorsLayer::permissive())
}
