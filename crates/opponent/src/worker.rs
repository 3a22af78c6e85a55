//! Background search thread.
//!
//! The caller owns a [`SearchWorker`] and asks it for moves one at a time.
//! Each request carries an id; a reply is only accepted if its id matches
//! the request in flight, so a late answer to a timed-out request can
//! never be mistaken for the current one.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chess_core::{Game, Move};
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_engine::greedy_move;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::OpponentConfig;
use crate::select::select_move_with_rng;
use crate::strength::{Strength, TimeControlKind};

/// Extra time the caller waits past the move budget before giving up.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(500);

const THREAD_NAME: &str = "search-worker";

/// Messages sent to the worker thread.
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    SelectMove {
        id: u64,
        game: Game,
        strength: Strength,
        budget_ms: u64,
        time_control: TimeControlKind,
    },
    Shutdown,
}

/// The worker's answer to a `SelectMove` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerResponse {
    pub id: u64,
    pub best_move: Option<Move>,
}

/// Infrastructure failures. None of these mean the position was bad.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("search worker did not answer within {waited_ms} ms")]
    Timeout { waited_ms: u64 },
    #[error("search worker thread is gone")]
    Disconnected,
    #[error("failed to spawn search worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Computes the move for one request on the worker thread.
pub type MoveHandler =
    Box<dyn FnMut(&Game, Strength, u64, TimeControlKind) -> Option<Move> + Send>;

/// Builds a fresh handler each time the thread is (re)spawned.
pub type HandlerFactory = Arc<dyn Fn() -> MoveHandler + Send + Sync>;

/// Handler that runs the real tiered selection with its own RNG.
pub fn default_handler_factory(seed: Option<u64>) -> HandlerFactory {
    Arc::new(move || -> MoveHandler {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Box::new(move |game, strength, budget_ms, time_control| {
            select_move_with_rng(game, strength, budget_ms, time_control, &mut rng)
        })
    })
}

struct WorkerThread {
    requests: Sender<WorkerRequest>,
    responses: Receiver<WorkerResponse>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerThread {
    fn spawn(factory: &HandlerFactory) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        let handler = factory();
        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run(request_rx, response_tx, handler))?;
        trace!("search worker started");
        Ok(Self {
            requests: request_tx,
            responses: response_rx,
            handle: Some(handle),
        })
    }

    /// Waits for the reply to `id` until `deadline`, discarding stale ones.
    fn wait_for(&self, id: u64, deadline: Instant) -> Result<WorkerResponse, RecvTimeoutError> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let response = self.responses.recv_timeout(remaining)?;
            if response.id == id {
                return Ok(response);
            }
            debug!(
                stale = response.id,
                expected = id,
                "dropping stale worker response"
            );
        }
    }

    /// Lets go of a thread that is still busy. The channels close and the
    /// thread exits once its current request returns; nobody waits for it.
    fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for WorkerThread {
    fn drop(&mut self) {
        let _ = self.requests.send(WorkerRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            // A panicked worker has nothing left to clean up.
            let _ = handle.join();
        }
    }
}

fn run(
    requests: Receiver<WorkerRequest>,
    responses: Sender<WorkerResponse>,
    mut handler: MoveHandler,
) {
    while let Ok(request) = requests.recv() {
        match request {
            WorkerRequest::SelectMove {
                id,
                game,
                strength,
                budget_ms,
                time_control,
            } => {
                let best_move = handler(&game, strength, budget_ms, time_control);
                if responses.send(WorkerResponse { id, best_move }).is_err() {
                    break;
                }
            }
            WorkerRequest::Shutdown => break,
        }
    }
    trace!("search worker exiting");
}

/// Owned handle to a background search thread.
///
/// Requests are serialised by `&mut self`. A thread that dies or misses
/// its deadline is abandoned, and the next request starts a new one.
pub struct SearchWorker {
    thread: Option<WorkerThread>,
    factory: HandlerFactory,
    grace: Duration,
    next_id: u64,
    fallback_rng: StdRng,
}

impl SearchWorker {
    /// Worker with the default grace period and an entropy-seeded RNG.
    pub fn spawn() -> Result<Self, WorkerError> {
        Self::with_handler(DEFAULT_GRACE, default_handler_factory(None))
    }

    /// Worker seeded and timed from an opponent config.
    pub fn from_config(config: &OpponentConfig) -> Result<Self, WorkerError> {
        let mut worker = Self::with_handler(
            Duration::from_millis(config.worker_grace_ms),
            default_handler_factory(config.seed),
        )?;
        if let Some(seed) = config.seed {
            worker.fallback_rng = StdRng::seed_from_u64(seed);
        }
        Ok(worker)
    }

    /// Worker running a custom move handler.
    pub fn with_handler(grace: Duration, factory: HandlerFactory) -> Result<Self, WorkerError> {
        let thread = WorkerThread::spawn(&factory)?;
        Ok(Self {
            thread: Some(thread),
            factory,
            grace,
            next_id: 0,
            fallback_rng: StdRng::from_entropy(),
        })
    }

    /// True while a worker thread is attached.
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Asks the worker for a move and waits up to `budget_ms` plus the grace
    /// period for the answer.
    pub fn request_move(
        &mut self,
        game: &Game,
        strength: Strength,
        budget_ms: u64,
        time_control: TimeControlKind,
    ) -> Result<Option<Move>, WorkerError> {
        if self.thread.is_none() {
            debug!("respawning search worker");
            self.thread = Some(WorkerThread::spawn(&self.factory)?);
        }
        let Some(thread) = self.thread.as_ref() else {
            return Err(WorkerError::Disconnected);
        };

        self.next_id += 1;
        let id = self.next_id;
        let request = WorkerRequest::SelectMove {
            id,
            game: game.clone(),
            strength,
            budget_ms,
            time_control,
        };
        let started = Instant::now();
        let deadline = started + Duration::from_millis(budget_ms) + self.grace;

        let outcome = match thread.requests.send(request) {
            Ok(()) => thread.wait_for(id, deadline),
            Err(_) => Err(RecvTimeoutError::Disconnected),
        };
        match outcome {
            Ok(response) => Ok(response.best_move),
            Err(RecvTimeoutError::Timeout) => {
                if let Some(stale) = self.thread.take() {
                    stale.detach();
                }
                Err(WorkerError::Timeout {
                    waited_ms: started.elapsed().as_millis() as u64,
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.thread = None;
                Err(WorkerError::Disconnected)
            }
        }
    }

    /// Like [`request_move`](Self::request_move), but a worker failure is
    /// logged and answered with a greedy move computed on this thread.
    ///
    /// Returns None only when the game is over.
    pub fn select_move_or_fallback(
        &mut self,
        game: &Game,
        strength: Strength,
        budget_ms: u64,
        time_control: TimeControlKind,
    ) -> Option<Move> {
        match self.request_move(game, strength, budget_ms, time_control) {
            Ok(best_move) => best_move,
            Err(err) => {
                warn!(error = %err, %strength, "search worker failed, playing a greedy move");
                greedy_move(game, &mut self.fallback_rng)
            }
        }
    }
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker")
            .field("running", &self.is_running())
            .field("grace", &self.grace)
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
