//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of by an actor. It lets you script return values and
//! failures for unit tests of domain clients without spawning any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires a failing backend) |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Client Logic Test (Pure Mock)</b></summary>
//!
//! **When to use**: Testing mapping and sorting logic in your client wrappers without spinning
//! up any actors.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, Placement, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Guest { id: u32, phone: String }
//! #[derive(Debug)] struct GuestCreate { phone: String }
//! #[derive(Debug)] struct GuestUpdate;
//! #[derive(Debug)] enum GuestAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Guest error")] struct GuestError;
//!
//! #[async_trait]
//! impl ActorEntity for Guest {
//!     type Id = u32; type Create = GuestCreate; type Update = GuestUpdate;
//!     type Action = GuestAction; type ActionResult = (); type Context = (); type Error = GuestError;
//!     fn id(&self) -> u32 { self.id }
//!     fn from_create_params(id: u32, params: GuestCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, phone: params.phone })
//!     }
//!     async fn on_update(&mut self, _: GuestUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: GuestAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! struct GuestClient { client: ResourceClient<Guest> }
//! impl GuestClient {
//!     async fn phone(&self, id: u32) -> Option<String> {
//!         let found = self.client.lookup(id).await.ok()??;
//!         Some(found.into_record().phone)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Guest>::new();
//!     mock.expect_lookup(1)
//!         .return_ok(Some(Placement::Live(Guest { id: 1, phone: "9876543210".into() })));
//!
//!     let guests = GuestClient { client: mock.client() };
//!     assert_eq!(guests.phone(1).await.as_deref(), Some("9876543210"));
//!     mock.verify();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Single Actor Test (Fast, Isolated)</b></summary>
//!
//! **When to use**: Testing one entity's hooks through a real `ResourceActor` with
//! [`Storage::volatile`](crate::Storage::volatile).
//!
//! ```rust
//! use resource_actor::{ActorEntity, Placement, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Bill { id: u32, paid: bool }
//! #[derive(Debug)] struct BillCreate;
//! #[derive(Debug)] struct BillUpdate;
//! #[derive(Debug)] enum BillAction { Pay }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct BillError;
//!
//! #[async_trait]
//! impl ActorEntity for Bill {
//!     type Id = u32; type Create = BillCreate; type Update = BillUpdate;
//!     type Action = BillAction; type ActionResult = (); type Context = (); type Error = BillError;
//!     fn id(&self) -> u32 { self.id }
//!     fn from_create_params(id: u32, _: BillCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, paid: false })
//!     }
//!     async fn on_update(&mut self, _: BillUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: BillAction, _: &()) -> Result<(), Self::Error> {
//!         self.paid = true;
//!         Ok(())
//!     }
//!     fn is_archived(&self) -> bool { self.paid }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Bill>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let bill = client.create(BillCreate).await.unwrap();
//!     client.perform_action(bill.id, BillAction::Pay).await.unwrap();
//!     let found = client.lookup(bill.id).await.unwrap().unwrap();
//!     assert!(matches!(found, Placement::Archived(b) if b.paid));
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Full System Integration Test (Comprehensive)</b></summary>
//!
//! **When to use**: Testing the whole system working together, end-to-end flows,
//! concurrency and persistence across restarts. See `tests/integration_test.rs`.
//! </details>
//!
//! ## Testing Failure Scenarios
//!
//! `MockClient` makes it easy to simulate errors that are hard to reproduce with real actors,
//! such as a full disk or an actor that has gone away.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Guest { id: u32 }
//! #[derive(Debug)] struct GuestCreate;
//! #[derive(Debug)] struct GuestUpdate;
//! #[derive(Debug)] enum GuestAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct GuestError;
//!
//! #[async_trait]
//! impl ActorEntity for Guest {
//!     type Id = u32; type Create = GuestCreate; type Update = GuestUpdate;
//!     type Action = GuestAction; type ActionResult = (); type Context = (); type Error = GuestError;
//!     fn id(&self) -> u32 { self.id }
//!     fn from_create_params(id: u32, _: GuestCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: GuestUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: GuestAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Guest>::new();
//!     let client = mock.client();
//!
//!     mock.expect_list().return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.list().await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw receiver, or the fluent
//! [`MockClient`] API.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Placement, ResourceRequest, Response};
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response the mock should send back for it.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Lookup {
        id: T::Id,
        response: Result<Option<Placement<T>>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    ListArchived {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that does not match
/// the next expectation (wrong kind, or wrong ID) panics the mock task, which the caller sees
/// as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_lookup(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<Placement<T>>> {
        self.builder(move |response| Expectation::Lookup { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_list_archived(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::ListArchived { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
            _response: PhantomData,
        }
    }
}

/// Registers the response for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    _response: PhantomData<fn() -> R>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }
}

fn reply<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn check_id<T: ActorEntity>(got: &T::Id, expected: &T::Id) {
    if got != expected {
        panic!("Mock expected a request for id {expected}, got {got}");
    }
}

fn answer<T: ActorEntity>(request: ResourceRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            reply(respond_to, response)
        }
        (
            ResourceRequest::Lookup { id, respond_to },
            Some(Expectation::Lookup { id: want, response }),
        ) => {
            check_id::<T>(&id, &want);
            reply(respond_to, response)
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
            reply(respond_to, response)
        }
        (
            ResourceRequest::ListArchived { respond_to },
            Some(Expectation::ListArchived { response }),
        ) => reply(respond_to, response),
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => {
            check_id::<T>(&id, &want);
            reply(respond_to, response)
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            check_id::<T>(&id, &want);
            reply(respond_to, response)
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            check_id::<T>(&id, &want);
            reply(respond_to, response)
        }
        (request, _) => {
            panic!(
                "Unexpected {} request or expectation mismatch",
                request_kind(&request)
            );
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Lookup { .. } => "Lookup",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::ListArchived { .. } => "ListArchived",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When a test needs to inspect the request payload itself (e.g. the exact `Create` params a
/// domain client built), take the receiver and answer each request by hand. The `expect_*`
/// helpers below pull the next message and destructure it.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
