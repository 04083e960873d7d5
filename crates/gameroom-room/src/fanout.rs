//! Delivering frames to one connection or to the whole room.

use futures_util::future::join_all;
use gameroom_session::SessionRegistry;
use gameroom_transport::{CloseCode, Connection, trim_reason};

/// Sends `text` to one connection. Returns whether it was written.
///
/// A connection that already reports closed is skipped. A write that fails
/// on an open connection closes it with [`CloseCode::UnexpectedCondition`]
/// and the error as the (trimmed) reason. Failures are never retried.
pub async fn send_to<C: Connection>(conn: &C, text: &str) -> bool {
    let conn_id = conn.id();
    if !conn.is_open() {
        tracing::debug!(%conn_id, "skipping send to closed connection");
        return false;
    }

    match conn.send(text).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%conn_id, error = %e, "unexpected condition writing message");
            let reason = e.to_string();
            if let Err(close_err) = conn
                .close(CloseCode::UnexpectedCondition, trim_reason(&reason))
                .await
            {
                tracing::debug!(%conn_id, error = %close_err, "close after failed write also failed");
            }
            false
        }
    }
}

/// Sends `text` to every connection registered when the broadcast starts.
///
/// Each recipient is independent: one failed write neither stops nor
/// delays delivery to the rest. Returns how many writes succeeded.
pub async fn broadcast_all<C: Connection>(
    registry: &SessionRegistry<C>,
    text: &str,
) -> usize {
    let recipients = registry.snapshot_for_broadcast();
    let results =
        join_all(recipients.iter().map(|conn| send_to(conn.as_ref(), text))).await;
    let delivered = results.into_iter().filter(|ok| *ok).count();
    tracing::debug!(recipients = recipients.len(), delivered, "broadcast");
    delivered
}
