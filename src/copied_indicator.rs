// src/copied_indicator.rs - Copied indicator with superseding reset timer
use std::sync::{Arc, Mutex};

use log::{debug, error, trace};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

use crate::BlockKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedIndicatorStatus {
    /// The block whose copy most recently succeeded, while its window is open
    pub current: Option<BlockKey>,
    /// Whether a reset is scheduled
    pub reset_pending: bool,
}

#[derive(Debug, Default)]
struct IndicatorState {
    current: Option<BlockKey>,
    /// Bumped on every mark, a reset only clears its own generation
    generation: u64,
    reset_task: Option<JoinHandle<()>>,
}

/// Tracks which block was copied last, for a fixed display window.
///
/// Marking a block cancels any pending reset and schedules a new one, so only
/// the most recent reset ever clears the indicator.
#[derive(Debug, Clone)]
pub struct CopiedIndicator {
    /// How long a mark stays visible
    display: Duration,

    /// Shared with the reset tasks
    state: Arc<Mutex<IndicatorState>>,
}

impl CopiedIndicator {
    pub fn new(display: Duration) -> Self {
        Self {
            display,
            state: Arc::new(Mutex::new(IndicatorState::default())),
        }
    }

    pub fn display_window(&self) -> Duration {
        self.display
    }

    /// Show `key` as copied and schedule its reset.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mark(&self, key: BlockKey) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Failed to acquire lock on copied indicator: {}", e);
                return;
            }
        };

        if let Some(previous) = state.reset_task.take() {
            trace!("Superseding pending reset");
            previous.abort();
        }

        state.generation += 1;
        state.current = Some(key);
        debug!("Marked {} as copied for {:?}", key, self.display);

        let generation = state.generation;
        let display = self.display;
        let shared = Arc::clone(&self.state);
        state.reset_task = Some(tokio::spawn(async move {
            time::sleep(display).await;
            match shared.lock() {
                Ok(mut state) if state.generation == generation => {
                    trace!("Clearing copied indicator for {:?}", state.current);
                    state.current = None;
                    state.reset_task = None;
                }
                Ok(_) => trace!("Stale reset ignored"),
                Err(e) => error!("Failed to acquire lock on copied indicator: {}", e),
            }
        }));
    }

    /// The block currently shown as copied
    pub fn current(&self) -> Option<BlockKey> {
        match self.state.lock() {
            Ok(state) => state.current,
            Err(e) => {
                error!("Failed to acquire lock on copied indicator: {}", e);
                None
            }
        }
    }

    pub fn is_copied(&self, key: BlockKey) -> bool {
        self.current() == Some(key)
    }

    /// Get the current status of the indicator
    pub fn get_status(&self) -> CopiedIndicatorStatus {
        match self.state.lock() {
            Ok(state) => CopiedIndicatorStatus {
                current: state.current,
                reset_pending: state
                    .reset_task
                    .as_ref()
                    .is_some_and(|task| !task.is_finished()),
            },
            Err(e) => {
                error!("Failed to acquire lock on copied indicator: {}", e);
                CopiedIndicatorStatus {
                    current: None,
                    reset_pending: false,
                }
            }
        }
    }
}
