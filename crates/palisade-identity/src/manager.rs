//! Identity manager: owns the system and token stores.

mod bootstrap;
mod groups;
mod tokens;
mod users;

pub use bootstrap::{BootstrapError, BootstrapOutcome, ADMIN_GROUP_NAME, ADMIN_USER_NAME};

use crate::errors::{ManagerError, Result};
use palisade_storage::{KvStore, StorageError};
use std::path::Path;
use tracing::{info, warn};

/// Identity manager
///
/// Exclusively owns the two store handles for the process lifetime: the
/// system store for durable identity entities and the token store for
/// short-lived session tokens. Construct once at startup and share by
/// reference; there are no ambient singletons.
#[derive(Debug)]
pub struct Manager {
    pub(crate) system: KvStore,
    pub(crate) tokens: KvStore,
}

impl Manager {
    /// Open the manager over two store directories.
    ///
    /// The system store opens first; if it fails, the token store is never
    /// touched. If the token store fails, the system store is closed before
    /// returning so that construction failure leaks nothing. Either failure
    /// names the store that caused it.
    pub async fn new<P, Q>(system_path: P, token_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let system = KvStore::open(&system_path).map_err(|e| ManagerError::StoreOpen {
            store: "system",
            source: e,
        })?;

        let tokens = match KvStore::open(&token_path) {
            Ok(tokens) => tokens,
            Err(e) => {
                if let Err(close_err) = system.close().await {
                    warn!("Failed to release system store after token store open failure: {close_err}");
                }
                return Err(ManagerError::StoreOpen {
                    store: "token",
                    source: e,
                });
            }
        };

        info!("Identity manager stores opened");
        Ok(Self { system, tokens })
    }

    /// Open a manager over two fresh temporary directories.
    ///
    /// This is public for use in other crates' test modules.
    pub async fn open_test() -> Result<Self> {
        let system = KvStore::open_test()?;
        let tokens = KvStore::open_test()?;
        Ok(Self { system, tokens })
    }

    /// Close both stores.
    ///
    /// Both close attempts are always made, even if the first fails; any
    /// failure is reported as a single aggregated error naming the outcome
    /// of each store. A second close fails the same way, with both
    /// components reporting the store as already closed.
    pub async fn close(&self) -> Result<()> {
        let system_result = self.system.close().await;
        let token_result = self.tokens.close().await;

        if system_result.is_ok() && token_result.is_ok() {
            info!("Identity manager closed");
            return Ok(());
        }

        Err(ManagerError::CloseFailure {
            system: describe_close(system_result),
            token: describe_close(token_result),
        })
    }
}

fn describe_close(result: std::result::Result<(), StorageError>) -> String {
    match result {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    }
}
