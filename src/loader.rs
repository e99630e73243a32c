//! Lazily built, single-flight shared spatial index.
//!
//! Building the index is the one expensive, blocking operation in this
//! crate: the boundary dataset comes from an injected collaborator and the
//! envelope computation is CPU-bound. [`LazyGeoIndex`] guarantees at most
//! one build in flight: the first caller runs the build, concurrent callers
//! wait for that same attempt, and every caller observes either the shared
//! completed index or that attempt's failure. A failed attempt resets the
//! slot so a later call can retry cleanly.

use crate::boundary::BoundaryPolygon;
use crate::error::{GridpostError, Result};
use crate::index::GeoIndex;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// The boundary data collaborator.
///
/// Implementations own their transport (filesystem, network, database) and
/// any I/O timeout policy; the core only consumes the already-deserialized
/// collection. Fetch failures surface as [`GridpostError::FetchFailed`].
pub trait BoundarySource: Send + Sync {
    fn fetch(&self) -> Result<Vec<BoundaryPolygon>>;
}

/// A source over an in-memory collection, for embedded datasets and tests.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    polygons: Vec<BoundaryPolygon>,
}

impl InMemorySource {
    pub fn new(polygons: Vec<BoundaryPolygon>) -> Self {
        Self { polygons }
    }
}

impl BoundarySource for InMemorySource {
    fn fetch(&self) -> Result<Vec<BoundaryPolygon>> {
        Ok(self.polygons.clone())
    }
}

enum BuildState {
    Idle,
    Building { attempt: u64 },
    Ready(Arc<GeoIndex>),
    Failed { attempt: u64, error: GridpostError },
}

/// Single-flight wrapper around [`GeoIndex`] construction.
pub struct LazyGeoIndex<S> {
    source: S,
    state: Mutex<BuildState>,
    progress: Condvar,
    attempts: AtomicU64,
    wait_timeout: Option<Duration>,
}

impl<S: BoundarySource> LazyGeoIndex<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(BuildState::Idle),
            progress: Condvar::new(),
            attempts: AtomicU64::new(0),
            wait_timeout: None,
        }
    }

    /// Bound how long a caller waits for another caller's in-flight build.
    ///
    /// Expiry surfaces as [`GridpostError::BuildTimeout`] instead of
    /// hanging indefinitely. The builder itself is not interrupted; its
    /// result still lands for later callers.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = Some(timeout);
        self
    }

    /// Whether a completed index is currently available.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.lock(), BuildState::Ready(_))
    }

    /// Get the shared index, building it on first use.
    ///
    /// The lock is released for the duration of the fetch and build, so
    /// waiters block on the condvar rather than the data transfer. Exactly
    /// one attempt runs at a time; all waiters of a failed attempt receive
    /// that attempt's error, and the next call after a failure starts a
    /// fresh attempt.
    pub fn get(&self) -> Result<Arc<GeoIndex>> {
        let mut state = self.state.lock();
        loop {
            match &*state {
                BuildState::Ready(index) => return Ok(Arc::clone(index)),
                BuildState::Building { attempt } => {
                    let waited_on = *attempt;
                    let timed_out = match self.wait_timeout {
                        Some(limit) => self.progress.wait_for(&mut state, limit).timed_out(),
                        None => {
                            self.progress.wait(&mut state);
                            false
                        }
                    };
                    if timed_out
                        && matches!(&*state, BuildState::Building { attempt } if *attempt == waited_on)
                    {
                        return Err(GridpostError::BuildTimeout);
                    }
                    if let BuildState::Failed { attempt, error } = &*state
                        && *attempt == waited_on
                    {
                        return Err(error.clone());
                    }
                    // Ready, a newer attempt, or back to idle: re-examine.
                }
                BuildState::Idle | BuildState::Failed { .. } => {
                    let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
                    *state = BuildState::Building { attempt };

                    let started = Instant::now();
                    let result = MutexGuard::unlocked(&mut state, || {
                        self.source.fetch().and_then(GeoIndex::build)
                    });

                    match result {
                        Ok(index) => {
                            let index = Arc::new(index);
                            log::info!(
                                "district index ready: {} boundaries in {:?}",
                                index.len(),
                                started.elapsed()
                            );
                            *state = BuildState::Ready(Arc::clone(&index));
                            self.progress.notify_all();
                            return Ok(index);
                        }
                        Err(error) => {
                            log::warn!("district index build failed: {error}");
                            *state = BuildState::Failed {
                                attempt,
                                error: error.clone(),
                            };
                            self.progress.notify_all();
                            return Err(error);
                        }
                    }
                }
            }
        }
    }
}
