//! Controller core for a single-recommendation form backed by the
//! `/recommendations` REST resource.
//!
//! # Overview
//! Reads the form, builds one HTTP request per user action, and reconciles
//! the response back onto the form, the status line and the search results
//! table. Only `Transport` performs I/O.
//!
//! # Design
//! - `RecommendationClient` is stateless: `build_*` produces requests,
//!   `parse_*` consumes responses.
//! - `ViewState` owns the form, status and results; `Controller` threads it
//!   through `prepare` / `PendingRequest::send` / `apply` instead of using
//!   globals. A sent request owns its inputs, so hosts may run several at once.
//! - Form slots are plain text. Only create coerces `likes` to a number.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod reconcile;
pub mod render;
pub mod status;
pub mod transport;
pub mod types;

pub use client::{parse_int_prefix, search_query, RecommendationClient};
pub use config::ClientConfig;
pub use controller::{Action, Controller, PendingRequest};
pub use error::{ApiError, ConfigError, TransportError};
pub use form::{Field, FormBinding};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use reconcile::{EntityOperation, Outcome, ViewState};
pub use render::ResultsTable;
pub use status::StatusChannel;
pub use transport::{HttpTransport, Transport};
pub use types::{CreateRecommendation, ErrorBody, Recommendation, UpdateRecommendation};
