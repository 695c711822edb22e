use crate::Result;

use arbiter_core::driver::{Connection, Driver};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long an authenticated connection is reused
    pub max_connection_time: Duration,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            max_connection_time: Duration::from_secs(6 * 60 * 60),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the driver and the cached authenticated connection.
///
/// Callers serialize on the lock, so concurrent queries racing an expired
/// session trigger a single login.
#[derive(Debug)]
pub struct Session {
    driver: Arc<dyn Driver>,
    config: SessionConfig,
    current: Mutex<Option<Established>>,
}

#[derive(Debug)]
struct Established {
    connection: Arc<dyn Connection>,
    at: Instant,
}

impl Session {
    pub fn new(driver: Arc<dyn Driver>, config: SessionConfig) -> Session {
        Session {
            driver,
            config,
            current: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the cached connection while it is within the validity window,
    /// otherwise connects again. A failed attempt leaves no connection cached.
    pub async fn connection(&self) -> Result<Arc<dyn Connection>> {
        let mut current = self.current.lock().await;

        if let Some(established) = &*current {
            if established.at.elapsed() < self.config.max_connection_time {
                return Ok(established.connection.clone());
            }
        }

        *current = None;

        match self.driver.connect().await {
            Ok(connection) => {
                tracing::info!(driver = ?self.driver, "arbiter.session.connect");
                *current = Some(Established {
                    connection: connection.clone(),
                    at: Instant::now(),
                });
                Ok(connection)
            }
            Err(err) => {
                tracing::warn!(error = %err, "arbiter.session.connect failed");
                Err(err)
            }
        }
    }

    pub async fn invalidate(&self) {
        *self.current.lock().await = None;
    }
}
