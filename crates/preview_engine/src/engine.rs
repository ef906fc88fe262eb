use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use preview_core::{ChatId, MessageId, PreviewDescriptor, Refresh};
use preview_logging::{preview_debug, preview_error, preview_trace};
use tokio::task::AbortHandle;

/// Identifies the row or notification a refresh belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshKey {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

impl RefreshKey {
    pub fn new(chat_id: ChatId, message_id: MessageId) -> Self {
        Self { chat_id, message_id }
    }
}

/// Completion of one submitted refresh.
#[derive(Debug)]
pub struct RefreshEvent {
    pub key: RefreshKey,
    /// Generation the descriptor was submitted with.
    pub generation: u64,
    pub outcome: Refresh,
}

impl RefreshEvent {
    /// Whether the event still matches the caller's latest generation for its key.
    pub fn is_current(&self, latest_generation: u64) -> bool {
        self.generation == latest_generation
    }
}

enum RefreshCommand {
    Submit {
        key: RefreshKey,
        generation: u64,
        descriptor: PreviewDescriptor,
    },
    Cancel {
        key: RefreshKey,
    },
}

/// Generation and ticket of the running refresh per key. Tickets are unique
/// per submit, so a resubmit with the same generation still supersedes.
struct Running {
    generation: u64,
    ticket: u64,
    handle: AbortHandle,
}

type InFlight = Arc<Mutex<HashMap<RefreshKey, Running>>>;

/// Owned by a spawned refresh; drops its key's entry when the task ends in
/// any way, unless a newer submit has taken the key.
struct Registration {
    in_flight: InFlight,
    key: RefreshKey,
    ticket: u64,
}

impl Registration {
    /// Removes the entry if it is still ours.
    fn release(&self) -> bool {
        let mut tasks = lock(&self.in_flight);
        match tasks.get(&self.key) {
            Some(running) if running.ticket == self.ticket => {
                tasks.remove(&self.key);
                true
            }
            _ => false,
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

/// Drives refreshers on a background tokio runtime.
///
/// At most one refresh runs per key: submitting again supersedes and aborts
/// the previous one. Aborted refreshes never report.
pub struct RefreshEngine {
    cmd_tx: mpsc::Sender<RefreshCommand>,
    event_rx: mpsc::Receiver<RefreshEvent>,
    in_flight: InFlight,
}

impl RefreshEngine {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
        let tasks = Arc::clone(&in_flight);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    preview_error!("Could not start the refresh runtime: {err}");
                    return;
                }
            };
            let mut next_ticket = 0u64;
            while let Ok(command) = cmd_rx.recv() {
                next_ticket += 1;
                handle_command(&runtime, &tasks, next_ticket, command, &event_tx);
            }
        });

        Self {
            cmd_tx,
            event_rx,
            in_flight,
        }
    }

    /// Starts refreshing `descriptor`. Descriptors without a refresher report
    /// `Unchanged` right away.
    pub fn submit(&self, key: RefreshKey, generation: u64, descriptor: PreviewDescriptor) {
        let _ = self.cmd_tx.send(RefreshCommand::Submit {
            key,
            generation,
            descriptor,
        });
    }

    pub fn cancel(&self, key: RefreshKey) {
        let _ = self.cmd_tx.send(RefreshCommand::Cancel { key });
    }

    pub fn try_recv(&self) -> Option<RefreshEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Whether a refresh for `key` has started and not yet ended.
    pub fn is_refreshing(&self, key: RefreshKey) -> bool {
        lock(&self.in_flight).contains_key(&key)
    }
}

impl Default for RefreshEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(in_flight: &InFlight) -> std::sync::MutexGuard<'_, HashMap<RefreshKey, Running>> {
    // A panicking refresh cannot leave the map half-updated.
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    in_flight: &InFlight,
    ticket: u64,
    command: RefreshCommand,
    event_tx: &mpsc::Sender<RefreshEvent>,
) {
    match command {
        RefreshCommand::Submit {
            key,
            generation,
            descriptor,
        } => {
            // Hold the lock across spawn so the task cannot finish before it is registered.
            let mut tasks = lock(in_flight);
            let registration = Registration {
                in_flight: Arc::clone(in_flight),
                key,
                ticket,
            };
            let event_tx = event_tx.clone();
            let handle = runtime.spawn(async move {
                let outcome = descriptor.refresh().await;
                if !registration.release() {
                    preview_trace!("Dropping superseded refresh of {key:?} generation {generation}");
                    return;
                }
                preview_debug!(
                    "Refresh of {key:?} generation {generation} finished: {}",
                    if outcome.is_changed() { "changed" } else { "unchanged" }
                );
                let _ = event_tx.send(RefreshEvent {
                    key,
                    generation,
                    outcome,
                });
            });
            let running = Running {
                generation,
                ticket,
                handle: handle.abort_handle(),
            };
            let previous = tasks.insert(key, running);
            // Aborting may drop the task here, and its registration takes the lock.
            drop(tasks);
            if let Some(previous) = previous {
                preview_trace!(
                    "Refresh of {key:?} generation {} superseded by {generation}",
                    previous.generation
                );
                previous.handle.abort();
            }
        }
        RefreshCommand::Cancel { key } => {
            let removed = lock(in_flight).remove(&key);
            if let Some(running) = removed {
                preview_trace!("Cancelled refresh of {key:?} generation {}", running.generation);
                running.handle.abort();
            }
        }
    }
}
