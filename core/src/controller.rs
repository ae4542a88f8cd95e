//! Action handlers tying the form, the request builder, the transport and
//! the reconciler together.
//!
//! # Design
//! A handler runs in three steps. `prepare` reads the form synchronously and
//! builds one request. `PendingRequest::send` owns everything it needs (a
//! client clone and a shared transport), so a host can spawn it and keep
//! taking input while it is in flight. `apply` projects each outcome onto
//! the view as it arrives. Nothing orders overlapping requests: whichever
//! completes last wins.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::client::RecommendationClient;
use crate::error::ApiError;
use crate::form::FormBinding;
use crate::http::HttpRequest;
use crate::reconcile::{EntityOperation, Outcome, ViewState};
use crate::transport::Transport;

/// The seven user triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Like,
    Retrieve,
    Delete,
    Clear,
    Search,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Update,
        Action::Like,
        Action::Retrieve,
        Action::Delete,
        Action::Clear,
        Action::Search,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Like => "like",
            Action::Retrieve => "retrieve",
            Action::Delete => "delete",
            Action::Clear => "clear",
            Action::Search => "search",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Entity(EntityOperation),
    Delete,
    Search,
}

/// A request built from the form but not yet sent.
pub struct PendingRequest<T> {
    client: RecommendationClient,
    transport: Arc<T>,
    operation: Operation,
    request: Result<HttpRequest, ApiError>,
}

impl<T: Transport> PendingRequest<T> {
    pub fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref().ok()
    }

    /// Send the request and parse whatever comes back. Borrows nothing from
    /// the controller, so the future can be spawned.
    pub async fn send(self) -> Outcome {
        let PendingRequest {
            client,
            transport,
            operation,
            request,
        } = self;
        let response = match request {
            Ok(request) => transport.send(request).await.map_err(ApiError::from),
            Err(err) => Err(err),
        };
        match operation {
            Operation::Entity(op) => {
                Outcome::Entity(op, response.and_then(|r| client.parse_recommendation(r)))
            }
            Operation::Delete => Outcome::Deleted(response.and_then(|r| client.parse_delete(r))),
            Operation::Search => Outcome::Searched(response.and_then(|r| client.parse_search(r))),
        }
    }
}

/// Owns the view and turns user actions into requests against `T`.
pub struct Controller<T> {
    client: RecommendationClient,
    transport: Arc<T>,
    view: ViewState,
}

impl<T: Transport> Controller<T> {
    pub fn new(client: RecommendationClient, transport: T) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
            view: ViewState::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Direct access to the input slots, for keystrokes.
    pub fn form_mut(&mut self) -> &mut FormBinding {
        &mut self.view.form
    }

    /// Run one action to completion.
    pub async fn dispatch(&mut self, action: Action) {
        if let Some(pending) = self.prepare(action) {
            let outcome = pending.send().await;
            self.apply(outcome);
        }
    }

    /// Read the form and build the action's request. `Clear` is handled
    /// locally and yields no request.
    pub fn prepare(&mut self, action: Action) -> Option<PendingRequest<T>> {
        info!(%action, "dispatching action");
        let form = self.view.form.read();
        let client = &self.client;
        let (operation, request) = match action {
            Action::Create => (
                Operation::Entity(EntityOperation::Create),
                client.build_create(&form),
            ),
            Action::Update => (
                Operation::Entity(EntityOperation::Update),
                client.build_update(&form),
            ),
            Action::Like => (
                Operation::Entity(EntityOperation::Like),
                client.build_like(&form),
            ),
            Action::Retrieve => (
                Operation::Entity(EntityOperation::Retrieve),
                Ok(client.build_retrieve(&form)),
            ),
            Action::Delete => (Operation::Delete, Ok(client.build_delete(&form))),
            Action::Search => (Operation::Search, Ok(client.build_search(&form))),
            Action::Clear => {
                self.view.form.reset();
                return None;
            }
        };
        Some(PendingRequest {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
            operation,
            request,
        })
    }

    pub fn apply(&mut self, outcome: Outcome) {
        self.view.apply(outcome);
    }
}
