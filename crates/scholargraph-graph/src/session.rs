//! The session boundary and its scoped release.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use scholargraph_core::{AccessMode, CypherQuery, GraphError, GraphResult, Record};
use tracing::{debug, warn};

/// A connected handle through which transactions run against the store.
///
/// `close` consumes the session, so nothing can be submitted after release.
#[async_trait]
pub trait GraphSession: Send + Sized {
    /// Submit `query` in one transaction of `mode` and drain every record.
    async fn run(&mut self, query: &CypherQuery, mode: AccessMode) -> GraphResult<Vec<Record>>;

    /// Release the session.
    async fn close(self) -> GraphResult<()>;
}

/// Run `body` against `session`, then close it exactly once.
///
/// The session is released on every exit path. If both the body and the
/// close fail, the body's error is returned and the close error is logged.
pub async fn with_session<S, T, E, F>(mut session: S, body: F) -> Result<T, E>
where
    S: GraphSession,
    E: From<GraphError> + std::fmt::Display,
    F: for<'a> FnOnce(&'a mut S) -> LocalBoxFuture<'a, Result<T, E>>,
{
    let outcome = body(&mut session).await;
    debug!(ok = outcome.is_ok(), "Releasing graph session");
    let closed = session.close().await;

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(E::from(close_err)),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "Failed to release session after error: {}", err);
            Err(err)
        }
    }
}
