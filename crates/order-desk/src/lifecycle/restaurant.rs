use crate::clients::{MenuClient, OrderClient};
use crate::model::{MenuItem, Order};
use crate::{menu_actor, order_actor};
use resource_actor::{ResourceActor, StoreError};
use std::path::Path;
use tracing::{error, info};

/// The runtime orchestrator for the restaurant backend.
///
/// `RestaurantSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the Menu and Order actors
/// - **Storage Selection**: In-memory stores, or JSON snapshots in a data directory
///
/// # Example
///
/// ```rust
/// use order_desk::lifecycle::RestaurantSystem;
/// use order_desk::model::MenuItemInput;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = RestaurantSystem::new(16);
///     system.menu_client.add_item(MenuItemInput::named("Idli", 30.0)).await?;
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct RestaurantSystem {
    /// Client for the Menu Store
    pub menu_client: MenuClient,

    /// Client for the Order Store and Order History Store
    pub order_client: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Starts both actors with in-memory stores.
    pub fn new(buffer: usize) -> Self {
        let (menu_actor, menu_client) = menu_actor::new(buffer);
        let (order_actor, order_client) = order_actor::new(buffer);
        Self::start(menu_actor, menu_client, order_actor, order_client)
    }

    /// Starts both actors, file-backed when `data_dir` is given.
    ///
    /// Fails if an existing snapshot cannot be read or parsed; nothing is started in that case.
    pub async fn open(buffer: usize, data_dir: Option<&Path>) -> Result<Self, StoreError> {
        let Some(dir) = data_dir else {
            return Ok(Self::new(buffer));
        };

        info!(data_dir = %dir.display(), "Loading stores");
        let (menu_actor, menu_client) = menu_actor::open(buffer, dir).await?;
        let (order_actor, order_client) = order_actor::open(buffer, dir).await?;
        Ok(Self::start(menu_actor, menu_client, order_actor, order_client))
    }

    fn start(
        menu_actor: ResourceActor<MenuItem>,
        menu_client: MenuClient,
        order_actor: ResourceActor<Order>,
        order_client: OrderClient,
    ) -> Self {
        let menu_handle = tokio::spawn(menu_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        Self {
            menu_client,
            order_client,
            handles: vec![menu_handle, order_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops this system's clients and waits for every actor task. Clones handed out
    /// elsewhere (e.g. to the HTTP router) must be dropped first, or this waits for them.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.menu_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
