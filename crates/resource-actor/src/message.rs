//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Which partition of the actor currently holds a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement<T> {
    Live(T),
    Archived(T),
}

impl<T> Placement<T> {
    pub fn record(&self) -> &T {
        match self {
            Placement::Live(item) | Placement::Archived(item) => item,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Placement::Live(item) | Placement::Archived(item) => item,
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, Placement::Archived(_))
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to standard **CRUD** operations plus listing, archive reads and a custom
/// `Action` variant for resource-specific logic:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new live record. Replies with
///   the stored record.
/// - **Lookup**: Finds a record in either partition.
/// - **List** / **ListArchived**: Snapshot of one partition, ordered by ID.
/// - **Update**: Uses [`ActorEntity::Update`] to modify a live record.
/// - **Delete**: Removes a live record. Replies with the removed record, or `None` when the
///   ID was not present.
/// - **Action**: Executes a custom [`ActorEntity::Action`] on a live record.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Lookup {
        id: T::Id,
        respond_to: Response<Option<Placement<T>>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    ListArchived {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
