//! Workflow requests.
//!
//! Ordering a catalog item or bundle creates a request that moves through
//! `Pending`, `Active` and `Finished` on the backend. The requests page shows
//! one row per request; scenarios locate rows with a [`CellFilter`] and wait
//! for them with [`wait_for_request`] (the page view) or
//! [`wait_for_request_finished`] (the REST view).

mod filter;
mod wait;

pub use filter::{CellFilter, Header};
pub use wait::{wait_for_request, wait_for_request_finished};

use crate::error::ConsoleResult;
use crate::wait::Truthy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

/// Message of a request that provisioned successfully.
pub const REQUEST_COMPLETE: &str = "Request complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    Pending,
    Active,
    Finished,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestState::Pending => "Pending",
            RequestState::Active => "Active",
            RequestState::Finished => "Finished",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Ok,
    Warn,
    Error,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestStatus::Ok => "Ok",
            RequestStatus::Warn => "Warn",
            RequestStatus::Error => "Error",
        })
    }
}

/// One row of the requests page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub description: String,
    pub requester: String,
    pub state: RequestState,
    pub status: RequestStatus,
    pub message: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Request {
    /// A freshly submitted request with a new id.
    pub fn new(description: impl Into<String>, requester: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.into(),
            requester: requester.into(),
            state: RequestState::Pending,
            status: RequestStatus::Ok,
            message: "VM Provisioning - Request Created".to_string(),
            created_on: now,
            updated_on: now,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == RequestState::Finished
    }

    /// Finished with status `Ok`.
    pub fn succeeded(&self) -> bool {
        self.is_finished() && self.status == RequestStatus::Ok
    }

    /// Text of the row's cell under `header`.
    pub fn cell(&self, header: Header) -> String {
        match header {
            Header::RequestId => self.id.clone(),
            Header::Description => self.description.clone(),
            Header::Requester => self.requester.clone(),
            Header::Status => self.status.to_string(),
            Header::RequestState => self.state.to_string(),
            Header::LastMessage => self.message.clone(),
        }
    }
}

/// A request row is always present once found.
impl Truthy for Request {
    fn is_truthy(&self) -> bool {
        true
    }
}

/// Where request rows are read from.
pub trait RequestStatusSource: Send + Sync {
    /// Rows matching every cell of `filter`.
    fn find_requests(
        &self,
        filter: &CellFilter,
    ) -> impl Future<Output = ConsoleResult<Vec<Request>>> + Send;

    fn get_request(&self, id: &str) -> impl Future<Output = ConsoleResult<Request>> + Send;

    /// Re-read request state from the backend.
    fn reload(&self) -> impl Future<Output = ConsoleResult<()>> + Send;
}
