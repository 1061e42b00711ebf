//! HTTP API Layer
//!
//! This crate provides the REST API for the tradebook ERP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers per domain area
//! - **DTOs**: camelCase wire objects matching the existing client
//! - **Error Handling**: consistent `{error, message}` bodies
//! - **PDF**: invoice download rendering
//!
//! The router is storage-agnostic: [`AppState`] carries the domain ports as
//! trait objects, so the binary wires PostgreSQL adapters while tests wire
//! the in-memory stores.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(parties, products, billing, config);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod pdf;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_billing::{BillingPort, EntityLockRegistry, InvoiceProcessor, PaymentProcessor};
use domain_inventory::ProductPort;
use domain_party::PartyPort;

use crate::config::ApiConfig;
use crate::handlers::{health, invoices, parties, payments, products};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub parties: Arc<dyn PartyPort>,
    pub products: Arc<dyn ProductPort>,
    pub billing: Arc<dyn BillingPort>,
    pub invoices: Arc<InvoiceProcessor>,
    pub payments: Arc<PaymentProcessor>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the processors over the given storage adapters
    ///
    /// The two processors share one lock registry so invoice and payment
    /// flows serialize against each other per entity.
    pub fn new(
        parties: Arc<dyn PartyPort>,
        products: Arc<dyn ProductPort>,
        billing: Arc<dyn BillingPort>,
        config: ApiConfig,
    ) -> Self {
        let locks = Arc::new(EntityLockRegistry::new());
        let invoices = Arc::new(InvoiceProcessor::new(
            parties.clone(),
            products.clone(),
            billing.clone(),
            locks.clone(),
        ));
        let payments = Arc::new(PaymentProcessor::new(
            parties.clone(),
            billing.clone(),
            locks,
        ));

        Self {
            parties,
            products,
            billing,
            invoices,
            payments,
            config,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no /api prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/", post(parties::create_customer).get(parties::list_customers))
        .route("/:id", get(parties::get_customer).delete(parties::delete_customer))
        .route("/:id/name", put(parties::rename_customer))
        .route("/:id/pay", post(parties::pay_customer));

    let vendor_routes = Router::new()
        .route("/", post(parties::create_vendor).get(parties::list_vendors))
        .route("/:id", get(parties::get_vendor).delete(parties::delete_vendor))
        .route("/:id/name", put(parties::rename_vendor))
        .route("/:id/pay", post(parties::pay_vendor));

    let product_routes = Router::new()
        .route("/", post(products::create_product).get(products::list_products))
        .route(
            "/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let invoice_routes = Router::new()
        .route("/", post(invoices::create_invoice).get(invoices::list_invoices))
        .route("/download/:invoice_id", get(invoices::download_invoice));

    let payment_routes = Router::new()
        .route("/", get(payments::list_payments))
        .route("/:id", get(payments::get_payment));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/vendors", vendor_routes)
        .nest("/products", product_routes)
        .nest("/invoices", invoice_routes)
        .nest("/payments", payment_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
