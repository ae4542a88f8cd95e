//! Projection of completed requests back onto the view.
//!
//! # Design
//! `ViewState` bundles the form, the status region and the results region
//! so handlers receive their UI explicitly instead of reaching for globals.
//! `ViewState::apply` is the only place outcomes mutate it, and it always
//! finishes with exactly one `StatusChannel::show`.
//!
//! Two asymmetries are kept on purpose: a failed delete discards the
//! server's message in favour of a fixed string, and only create coerces
//! `likes` (see `client`).

use tracing::{info, warn};

use crate::error::ApiError;
use crate::form::FormBinding;
use crate::render::ResultsTable;
use crate::status::StatusChannel;
use crate::types::Recommendation;

pub const SUCCESS: &str = "Success";
pub const DELETED: &str = "Recommendation has been Deleted!";
pub const DELETE_FAILED: &str = "Server error!";

/// Operations whose success payload is a single recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOperation {
    Create,
    Update,
    Like,
    Retrieve,
}

/// A finished request, tagged with the operation that issued it.
#[derive(Debug)]
pub enum Outcome {
    Entity(EntityOperation, Result<Recommendation, ApiError>),
    Deleted(Result<(), ApiError>),
    Searched(Result<Vec<Recommendation>, ApiError>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub form: FormBinding,
    pub status: StatusChannel,
    /// `None` until the first successful search.
    pub results: Option<ResultsTable>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Entity(operation, Ok(recommendation)) => {
                info!(?operation, id = %recommendation.id, "request succeeded");
                self.form.populate(&recommendation);
                self.status.show(SUCCESS);
            }
            Outcome::Entity(operation, Err(err)) => {
                warn!(?operation, error = %err, "request failed");
                if operation == EntityOperation::Retrieve {
                    self.form.reset();
                }
                self.status.show(err.user_message());
            }
            Outcome::Deleted(Ok(())) => {
                info!("recommendation deleted");
                self.form.reset();
                self.status.show(DELETED);
            }
            Outcome::Deleted(Err(err)) => {
                warn!(error = %err, "delete failed");
                self.status.show(DELETE_FAILED);
            }
            Outcome::Searched(Ok(rows)) => {
                info!(count = rows.len(), "search succeeded");
                if let Some(first) = rows.first() {
                    self.form.populate(first);
                }
                self.results = Some(ResultsTable::new(rows));
                self.status.show(SUCCESS);
            }
            Outcome::Searched(Err(err)) => {
                warn!(error = %err, "search failed");
                self.status.show(err.user_message());
            }
        }
    }
}
