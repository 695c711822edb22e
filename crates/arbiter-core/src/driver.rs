mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::{fmt::Debug, sync::Arc};

/// Entry point into the remote API.
///
/// Implementations own credentials and authentication. Arbiter only asks for
/// a connection and caches it for the session's validity window.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Open an authenticated connection. May suspend while logging in.
    async fn connect(&self) -> crate::Result<Arc<dyn Connection>>;
}

/// An authenticated handle able to run operations against the remote API.
///
/// A connection is shared between queries, so operations take `&self`.
#[async_trait]
pub trait Connection: Debug + Send + Sync + 'static {
    /// Execute a remote operation
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
