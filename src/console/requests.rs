//! Requests page and the simulated provisioning workflow.

use super::SimulatedConsole;
use super::vms;
use crate::error::{ConsoleError, ConsoleResult};
use crate::requests::{
    CellFilter, REQUEST_COMPLETE, Request, RequestState, RequestStatus, RequestStatusSource,
};
use crate::storage::EntityStore;
use crate::vm::{PowerState, Vm};
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub(super) const REQUESTS: &str = "requests";

/// What one ordered item provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ProvisionTarget {
    pub provider: Option<String>,
    pub vm_name: Option<String>,
}

/// A request row plus the backend's progress on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrackedRequest {
    request: Request,
    ticks: u32,
    targets: Vec<ProvisionTarget>,
}

/// Record a new request for `targets`.
pub(super) async fn submit<S: EntityStore>(
    console: &SimulatedConsole<S>,
    description: &str,
    targets: Vec<ProvisionTarget>,
) -> ConsoleResult<Request> {
    let request = Request::new(description, console.settings.requester.clone());
    let tracked = TrackedRequest {
        request: request.clone(),
        ticks: 0,
        targets,
    };
    console.save(REQUESTS, &request.id, &tracked).await?;
    info!(
        "Submitted request {} for '{}' ({} items)",
        request.id,
        description,
        tracked.targets.len()
    );
    Ok(request)
}

impl<S: EntityStore> SimulatedConsole<S> {
    /// Move one request along if it has waited long enough in its state.
    async fn advance(&self, mut tracked: TrackedRequest) -> ConsoleResult<TrackedRequest> {
        tracked.ticks += 1;
        if tracked.ticks < self.settings.request_ticks.max(1) {
            return Ok(tracked);
        }
        tracked.ticks = 0;

        let request = &mut tracked.request;
        match request.state {
            RequestState::Pending => {
                request.state = RequestState::Active;
                request.message = "Request is being processed".to_string();
            }
            RequestState::Active => {
                let mut missing = None;
                for target in &tracked.targets {
                    if let Some(provider) = &target.provider {
                        if !self.has_provider(provider).await? {
                            missing = Some(provider.clone());
                            break;
                        }
                    }
                }

                request.state = RequestState::Finished;
                match missing {
                    Some(provider) => {
                        warn!(
                            "Request {} lost its provider '{}' before completing",
                            request.id, provider
                        );
                        request.status = RequestStatus::Error;
                        request.message = format!(
                            "Error: provider '{}' of the requested template no longer exists",
                            provider
                        );
                    }
                    None => {
                        request.status = RequestStatus::Ok;
                        request.message = REQUEST_COMPLETE.to_string();
                        for target in &tracked.targets {
                            if let (Some(provider), Some(vm_name)) =
                                (&target.provider, &target.vm_name)
                            {
                                let vm = Vm::new(
                                    format!("{}_0001", vm_name),
                                    provider.clone(),
                                    PowerState::On,
                                );
                                vms::insert(self, vm).await?;
                            }
                        }
                    }
                }
            }
            RequestState::Finished => {}
        }
        request.updated_on = Utc::now();
        debug!(
            "Request {} is now {} ({})",
            request.id, request.state, request.status
        );
        Ok(tracked)
    }
}

impl<S: EntityStore> RequestStatusSource for SimulatedConsole<S> {
    /// Newest requests first, as on the requests page.
    async fn find_requests(&self, filter: &CellFilter) -> ConsoleResult<Vec<Request>> {
        let tracked: Vec<TrackedRequest> = self.load_all(REQUESTS).await?;
        let mut rows: Vec<Request> = tracked
            .into_iter()
            .map(|t| t.request)
            .filter(|row| filter.matches(row))
            .collect();
        rows.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(rows)
    }

    async fn get_request(&self, id: &str) -> ConsoleResult<Request> {
        let tracked: Option<TrackedRequest> = self.load(REQUESTS, id).await?;
        tracked
            .map(|t| t.request)
            .ok_or_else(|| ConsoleError::not_found("Request", id))
    }

    async fn reload(&self) -> ConsoleResult<()> {
        let _progress = self.progress.lock().await;
        let all: Vec<TrackedRequest> = self.load_all(REQUESTS).await?;
        for tracked in all {
            if tracked.request.is_finished() {
                continue;
            }
            let tracked = self.advance(tracked).await?;
            self.save(REQUESTS, &tracked.request.id, &tracked).await?;
        }
        Ok(())
    }
}
