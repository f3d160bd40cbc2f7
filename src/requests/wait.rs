//! Waiting on workflow requests.

use super::{CellFilter, Request, RequestState, RequestStatus, RequestStatusSource};
use crate::error::ConsoleError;
use crate::wait::{AsyncWaiter, PollResult, WaitError, WaitOutcome, WaitSpec};
use log::{debug, info};

/// Wait until a row matching `filter` reaches `Finished`, reloading the
/// page before every retry.
///
/// Any finished row ends the wait, whatever its status; callers check
/// `status` and `message` on the returned row. While pending, the error's
/// `last` value is the first matching row, or `None` if no row matched yet.
pub async fn wait_for_request<S>(
    source: &S,
    filter: &CellFilter,
    spec: &WaitSpec,
) -> Result<WaitOutcome<Request>, WaitError<Option<Request>, ConsoleError>>
where
    S: RequestStatusSource,
{
    debug!("Waiting for request row {}", filter);
    AsyncWaiter::new(spec)
        .refresh(async || source.reload().await)
        .poll(async || {
            let rows = source.find_requests(filter).await?;
            Ok::<_, ConsoleError>(classify_rows(rows))
        })
        .await
}

/// The first finished row ends the wait; otherwise the first match, if any,
/// is kept as the pending observation.
fn classify_rows(rows: Vec<Request>) -> PollResult<Request, Option<Request>> {
    let mut first = None;
    for row in rows {
        if row.is_finished() {
            return PollResult::Success(row);
        }
        if first.is_none() {
            first = Some(row);
        }
    }
    PollResult::Pending(first)
}

/// Wait until request `id` is finished with status `Ok`.
///
/// A request that finishes with any other status fails the wait at once
/// instead of running out the timeout.
pub async fn wait_for_request_finished<S>(
    source: &S,
    id: &str,
    spec: &WaitSpec,
) -> Result<WaitOutcome<Request>, WaitError<Request, ConsoleError>>
where
    S: RequestStatusSource,
{
    AsyncWaiter::new(spec)
        .refresh(async || source.reload().await)
        .poll(async || {
            let request = source.get_request(id).await?;
            info!(
                "Request status: {}, Request state: {}, Request message: {}",
                request.status, request.state, request.message
            );
            Ok::<_, ConsoleError>(classify_finished(request))
        })
        .await
}

fn classify_finished(request: Request) -> PollResult<Request> {
    match (request.state, request.status) {
        (RequestState::Finished, RequestStatus::Ok) => PollResult::Success(request),
        (RequestState::Finished, status) => PollResult::Failure(format!(
            "request {} finished with status {}: {}",
            request.id, status, request.message
        )),
        _ => PollResult::Pending(request),
    }
}
