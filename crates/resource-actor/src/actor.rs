//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the core component that manages the lifecycle
//! and state of entities. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::{FrameworkError, StoreError};
use crate::message::{Placement, ResourceRequest};
use crate::store::Storage;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "Server" half of the actor. It owns both partitions of the store
/// (`live` and `archive`), the persistence backends, and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each actor processes its messages *sequentially* in a loop, so the maps need no `Mutex`.
/// A read that arrives while an action is relocating a record waits for that action to
/// finish, which is what keeps a record in exactly one partition from every caller's view.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` (volatile) or `ResourceActor::open()` (loads the
///     persisted snapshots) returns the `actor` and its `client`.
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Dish { id: u32, name: String }
/// #[derive(Debug)] struct DishCreate { name: String }
/// #[derive(Debug)] struct DishUpdate;
/// #[derive(Debug)] enum DishAction {}
/// #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
///
/// #[async_trait]
/// impl ActorEntity for Dish {
///     type Id = u32;
///     type Create = DishCreate;
///     type Update = DishUpdate;
///     type Action = DishAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = DishError;
///
///     fn id(&self) -> u32 { self.id }
///     fn from_create_params(id: u32, p: DishCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, name: p.name })
///     }
///     async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: DishAction, _: &()) -> Result<(), Self::Error> {
///         match a {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Dish>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let dish = client.create(DishCreate { name: "Idli".into() }).await.unwrap();
///     assert_eq!(dish.id, 1);
/// }
/// ```
///
/// # Persistence
///
/// Every mutation is applied in memory, then written through the matching [`Storage`]
/// backend. If the write fails the in-memory change is undone before the error is returned,
/// so a caller that sees `FrameworkError::Storage` can rely on nothing having changed.
/// A relocation writes the archive first and the live partition second.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    live: HashMap<T::Id, T>,
    archive: HashMap<T::Id, T>,
    /// `None` once the last `u32` has been handed out.
    next_id: Option<u32>,
    storage: Storage<T>,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a volatile `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel; once full, client calls wait for
    /// space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::assemble(buffer_size, Storage::volatile(), HashMap::new(), HashMap::new())
    }

    /// Creates a `ResourceActor` whose partitions are loaded from, and written back to,
    /// `storage`. The ID sequence resumes after the highest persisted ID.
    ///
    /// A record found in both snapshots (a crash between the two writes of a relocation)
    /// is kept in the archive only. A snapshot already holding `u32::MAX` is refused, since
    /// nothing could ever be created in it.
    pub async fn open(
        buffer_size: usize,
        storage: Storage<T>,
    ) -> Result<(Self, ResourceClient<T>), StoreError> {
        let entity_type = entity_type::<T>();

        let archive: HashMap<T::Id, T> = storage
            .archive
            .load()
            .await?
            .into_iter()
            .map(|item| (item.id(), item))
            .collect();

        let mut live = HashMap::new();
        for item in storage.live.load().await? {
            let id = item.id();
            if archive.contains_key(&id) {
                warn!(entity_type, %id, "Found in both partitions, keeping archived copy");
                continue;
            }
            live.insert(id, item);
        }

        let highest = highest_id(&live, &archive);
        if highest == u32::MAX {
            error!(entity_type, highest, "No IDs left after loading snapshots");
            return Err(StoreError::IdsExhausted(highest));
        }

        Ok(Self::assemble(buffer_size, storage, live, archive))
    }

    fn assemble(
        buffer_size: usize,
        storage: Storage<T>,
        live: HashMap<T::Id, T>,
        archive: HashMap<T::Id, T>,
    ) -> (Self, ResourceClient<T>) {
        let next_id = highest_id(&live, &archive).checked_add(1);
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            live,
            archive,
            next_id,
            storage,
            entity_type: entity_type::<T>(),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies that were created *after* the actor was instantiated
    /// but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(
            entity_type,
            live = self.live.len(),
            archived = self.archive.len(),
            next_id = ?self.next_id,
            "Actor started"
        );

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                ResourceRequest::Lookup { id, respond_to } => {
                    let found = self.lookup(&id);
                    debug!(entity_type, %id, found = found.is_some(), "Lookup");
                    let _ = respond_to.send(Ok(found));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.live.len(), "List");
                    let items = ordered(&self.live).into_iter().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::ListArchived { respond_to } => {
                    debug!(entity_type, size = self.archive.len(), "ListArchived");
                    let items = ordered(&self.archive).into_iter().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let _ = respond_to.send(self.act(id, action, &context).await);
                }
            }
        }

        info!(
            entity_type,
            live = self.live.len(),
            archived = self.archive.len(),
            "Shutdown"
        );
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(raw_id) = self.next_id else {
            error!(entity_type, "No IDs left to assign");
            return Err(FrameworkError::IdsExhausted);
        };
        self.next_id = raw_id.checked_add(1);
        let id = T::Id::from(raw_id);

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            entity_error(e)
        })?;
        item.on_create(context).await.map_err(|e| {
            warn!(entity_type, error = %e, "on_create failed");
            entity_error(e)
        })?;

        self.live.insert(id.clone(), item.clone());
        if let Err(e) = self.persist_live().await {
            self.live.remove(&id);
            return Err(self.storage_failed(&id, e));
        }

        info!(entity_type, %id, size = self.live.len(), "Created");
        Ok(item)
    }

    fn lookup(&self, id: &T::Id) -> Option<Placement<T>> {
        if let Some(item) = self.live.get(id) {
            return Some(Placement::Live(item.clone()));
        }
        self.archive.get(id).cloned().map(Placement::Archived)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.live.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let previous = item.clone();
        if let Err(e) = item.on_update(update, context).await {
            *item = previous;
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(entity_error(e));
        }
        let updated = item.clone();

        if let Err(e) = self.persist_live().await {
            self.live.insert(id.clone(), previous);
            return Err(self.storage_failed(&id, e));
        }

        info!(entity_type, %id, "Updated");
        Ok(updated)
    }

    async fn delete(
        &mut self,
        id: T::Id,
        context: &T::Context,
    ) -> Result<Option<T>, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.live.get(&id) else {
            debug!(entity_type, %id, "Nothing to delete");
            return Ok(None);
        };

        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(entity_error(e));
        }

        let Some(removed) = self.live.remove(&id) else {
            return Ok(None);
        };
        if let Err(e) = self.persist_live().await {
            self.live.insert(id.clone(), removed);
            return Err(self.storage_failed(&id, e));
        }

        info!(entity_type, %id, size = self.live.len(), "Deleted");
        Ok(Some(removed))
    }

    async fn act(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.live.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let previous = item.clone();
        let result = match item.handle_action(action, context).await {
            Ok(result) => result,
            Err(e) => {
                *item = previous;
                warn!(entity_type, %id, error = %e, "Action failed");
                return Err(entity_error(e));
            }
        };

        if !item.is_archived() {
            if let Err(e) = self.persist_live().await {
                self.live.insert(id.clone(), previous);
                return Err(self.storage_failed(&id, e));
            }
            info!(entity_type, %id, "Action ok");
            return Ok(result);
        }

        if let Some(done) = self.live.remove(&id) {
            self.archive.insert(id.clone(), done);
        }
        if let Err(e) = self.persist_relocation().await {
            self.archive.remove(&id);
            self.live.insert(id.clone(), previous);
            self.resync().await;
            return Err(self.storage_failed(&id, e));
        }

        info!(
            entity_type,
            %id,
            live = self.live.len(),
            archived = self.archive.len(),
            "Archived"
        );
        Ok(result)
    }

    async fn persist_live(&self) -> Result<(), StoreError> {
        self.storage.live.save(&ordered(&self.live)).await
    }

    async fn persist_relocation(&self) -> Result<(), StoreError> {
        self.storage.archive.save(&ordered(&self.archive)).await?;
        self.persist_live().await
    }

    /// Rewrites both snapshots from memory after a failed relocation, in case the archive
    /// write landed before the live write failed.
    async fn resync(&self) {
        if let Err(e) = self.persist_relocation().await {
            error!(
                entity_type = self.entity_type,
                error = %e,
                "Resync after failed write also failed"
            );
        }
    }

    fn storage_failed(&self, id: &T::Id, e: StoreError) -> FrameworkError {
        error!(entity_type = self.entity_type, %id, error = %e, "Write failed, change rolled back");
        FrameworkError::Storage(e)
    }
}

/// Records ordered by ascending numeric ID.
fn highest_id<T: ActorEntity>(live: &HashMap<T::Id, T>, archive: &HashMap<T::Id, T>) -> u32 {
    live.keys()
        .chain(archive.keys())
        .map(|id| -> u32 { id.clone().into() })
        .max()
        .unwrap_or(0)
}

fn ordered<T: ActorEntity>(map: &HashMap<T::Id, T>) -> Vec<&T> {
    let mut items: Vec<(u32, &T)> = map
        .iter()
        .map(|(id, item)| (id.clone().into(), item))
        .collect();
    items.sort_by_key(|(key, _)| *key);
    items.into_iter().map(|(_, item)| item).collect()
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

// Just the type name (e.g. "Order" instead of "order_desk::model::order::Order").
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
