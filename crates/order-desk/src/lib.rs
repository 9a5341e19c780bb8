//! # Order Desk
//!
//! Backend for a small restaurant: a menu the admin edits, orders placed from table-side
//! phones, and an order history of everything the kitchen has completed.
//!
//! ## Core Components
//!
//! - **[model]**: The records ([`MenuItem`](model::MenuItem), [`Order`](model::Order)) and the
//!   lenient inputs they are validated from.
//! - **[menu_actor]** / **[order_actor]**: Each store is a
//!   [`ResourceActor`](resource_actor::ResourceActor) that owns its records and applies one
//!   request at a time. Completed orders move to the order actor's archive partition, which
//!   is the order history.
//! - **[clients]**: Typed wrappers ([`MenuClient`](clients::MenuClient),
//!   [`OrderClient`](clients::OrderClient)) that hide the message passing.
//! - **[api]**: The axum router.
//! - **[config]** and **[lifecycle]**: Environment settings, actor startup and graceful
//!   shutdown.
//!
//! ## Testing
//!
//! See [`resource_actor::mock`] for testing clients without spawning actors, and the `tests/`
//! directory for end-to-end tests through the router.

pub mod api;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
