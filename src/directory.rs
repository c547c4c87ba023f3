use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error};
use serde::Serialize;
use tokio::sync::watch;

use crate::record::{normalize_profiles, UserRecord};
use crate::source::{ProfileSource, Query};
use crate::Result;

/// What consumers of the directory see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryState {
    pub records: Vec<UserRecord>,
    pub loading: bool,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
        }
    }
}

/// Token shared between a directory handle and its fetch task.
/// Revoked once the handle is gone.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Clears the loading flag when dropped, whichever way the fetch ends.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<DirectoryState>,
    liveness: &'a Liveness,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.liveness.is_alive() {
            self.state.send_modify(|state| state.loading = false);
        }
    }
}

/// Fetch every profile and normalize it, without any lifecycle around it.
pub async fn fetch_records(source: &dyn ProfileSource) -> Result<Vec<UserRecord>> {
    let rows = source.select(&Query::profiles()).await?.into_result()?;
    debug!("Fetched {} profiles", rows.len());
    normalize_profiles(rows)
}

/// A mounted user directory.
///
/// Mounting starts exactly one fetch. The state starts as
/// `{records: [], loading: true}` and moves to `loading: false` once the
/// fetch settles, with records filled in only when it succeeded.
/// Failures are logged and never reach the consumer.
///
/// Dropping the handle revokes its [`Liveness`]: a fetch still in flight
/// is left to finish but its outcome is discarded.
#[derive(Debug)]
pub struct UserDirectory {
    state: watch::Receiver<DirectoryState>,
    liveness: Liveness,
}

impl UserDirectory {
    /// Must be called from within a tokio runtime.
    pub fn mount(source: Arc<dyn ProfileSource>) -> Self {
        let (sender, state) = watch::channel(DirectoryState::default());
        let liveness = Liveness::new();

        tokio::spawn(initialize(source, sender, liveness.clone()));

        Self { state, liveness }
    }

    pub fn state(&self) -> DirectoryState {
        self.state.borrow().clone()
    }

    pub fn records(&self) -> Vec<UserRecord> {
        self.state.borrow().records.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<DirectoryState> {
        self.state.clone()
    }

    /// Wait until the fetch has settled and return the resulting state.
    ///
    /// Never returns if the data source never answers.
    pub async fn settled(&self) -> DirectoryState {
        let mut state = self.state.clone();
        if let Ok(settled) = state.wait_for(|state| !state.loading).await {
            return settled.clone();
        }
        // Fetch task gone without settling, e.g. its runtime shut down.
        let current = state.borrow().clone();
        current
    }
}

impl Drop for UserDirectory {
    fn drop(&mut self) {
        self.liveness.revoke();
    }
}

async fn initialize(
    source: Arc<dyn ProfileSource>,
    state: watch::Sender<DirectoryState>,
    liveness: Liveness,
) {
    let _loading = LoadingGuard {
        state: &state,
        liveness: &liveness,
    };

    match fetch_records(source.as_ref()).await {
        Ok(records) if liveness.is_alive() => {
            state.send_modify(|state| state.records = records);
        }
        Ok(records) => {
            debug!("Directory dropped, discarding {} records", records.len());
        }
        Err(err) => error!("Error fetching users: {}", err),
    }
}
