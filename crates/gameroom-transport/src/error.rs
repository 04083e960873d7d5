/// Errors from the transport layer.
///
/// The `Display` text of a write error becomes the close reason sent to
/// the peer, so keep messages short.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection has already been closed; carries its id.
    #[error("{0} is closed")]
    ConnectionClosed(String),

    /// Writing a frame failed.
    #[error("write failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading a frame failed.
    #[error("read failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding the listener or completing a handshake failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),
}
