//! Domain clients: typed wrappers over [`resource_actor::ResourceClient`] that speak in menu
//! and order terms and return each actor's own error type.

pub mod menu_client;
pub mod order_client;

pub use menu_client::MenuClient;
pub use order_client::OrderClient;
