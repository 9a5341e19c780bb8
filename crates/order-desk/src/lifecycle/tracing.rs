//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Compact format with the crate/module prefix hidden (`with_target(false)`); the actor loop
//! tags its events with `entity_type` instead. The level comes from `RUST_LOG` and defaults to
//! `info`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Startup (with loaded record counts), shutdown and final sizes
//! - **Entity Operations**: Create, Lookup, List, Update, Delete and Actions, with IDs
//! - **Storage**: Failed writes and the rollback that follows
//! - **HTTP**: One span per request from `tower-http`'s `TraceLayer`
//!
//! ## Workflow Trace Example
//!
//! Placing and completing an order with `RUST_LOG=info`:
//!
//! ```text
//! INFO Created entity_type="Order" id=1 size=1
//! INFO place_order: Order placed order_id=1 table_no=4
//! INFO Archived entity_type="Order" id=1 live=0 archived=1
//! INFO complete: Order completed order_id=1
//! ```
//!
//! With `RUST_LOG=debug` the client spans also log the full request payloads once, at entry.
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "place_order: Order placed")
        .init();
}
