//! Text cursor visibility and blink.
//!
//! The cursor is either hidden or visible. While visible, a background blink
//! thread alternates the blink phase every period and raises a dirty
//! notification on each flip. The phase starts Off on every show, so the
//! first flip (immediately after spawn) turns the reverse-video block on.
//!
//! The cursor offset itself lives next to the buffer (see `Widget`), so
//! edits and offset moves are atomic with respect to projection. This type
//! owns only visibility, phase, and the blink task.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::event::DirtyHandlers;

/// Default blink period.
pub const BLINK_RATE: Duration = Duration::from_millis(600);

/// Shortest period accepted; zero would spin the blink thread.
const MIN_BLINK_PERIOD: Duration = Duration::from_millis(1);

/// Snapshot of the cursor as the projection sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorView {
    pub enabled: bool,
    pub blink_on: bool,
    pub position: usize,
}

impl CursorView {
    /// Whether the reverse-video cursor block is drawn over cell `index`.
    pub fn draws_at(&self, index: usize) -> bool {
        self.enabled && self.blink_on && self.position == index
    }
}

/// Running blink thread plus its one-shot cancellation channel.
struct BlinkTask {
    cancel: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl BlinkTask {
    fn spawn(blink_on: Arc<AtomicBool>, dirty: Arc<DirtyHandlers>, period: Duration) -> io::Result<Self> {
        let (cancel, cancel_rx) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("cursor-blink".into())
            .spawn(move || Self::blink_loop(&blink_on, &dirty, &cancel_rx, period))?;
        Ok(Self {
            cancel,
            thread: Some(thread),
        })
    }

    fn blink_loop(blink_on: &AtomicBool, dirty: &DirtyHandlers, cancel_rx: &mpsc::Receiver<()>, period: Duration) {
        log::debug!("cursor: blink task started, period={period:?}");
        loop {
            let was_on = blink_on.fetch_xor(true, Ordering::AcqRel);
            log::trace!("cursor: blink {}", if was_on { "off" } else { "on" });
            dirty.notify();

            match cancel_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {}
                // Cancelled, or the cursor was dropped without a hide.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        log::debug!("cursor: blink task stopped");
    }

    /// Send the cancellation and wait for the thread to exit.
    fn stop(mut self) {
        // The thread may already be gone; a failed send is fine.
        let _ = self.cancel.send(());
        let Some(handle) = self.thread.take() else {
            return;
        };
        // A dirty handler running on the blink thread may drop the last
        // widget handle. The thread exits on its own once it sees the signal.
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            log::warn!("cursor: blink thread panicked");
        }
    }
}

/// Cursor visibility, blink phase, and the blink task that drives it.
///
/// `show`, `hide`, and `restart` are serialized by one mutex that owns the
/// task handle, so at most one blink thread exists and the cancellation is
/// sent only to a live task. The blink thread never takes that mutex.
pub struct Cursor {
    enabled: AtomicBool,
    blink_on: Arc<AtomicBool>,
    task: Mutex<Option<BlinkTask>>,
    dirty: Arc<DirtyHandlers>,
    period: Duration,
}

impl Cursor {
    /// Create a hidden cursor that notifies `dirty` on every blink.
    pub fn new(dirty: Arc<DirtyHandlers>) -> Self {
        Self::with_period(dirty, BLINK_RATE)
    }

    /// Create a hidden cursor with a custom blink period.
    pub fn with_period(dirty: Arc<DirtyHandlers>, period: Duration) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            blink_on: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
            dirty,
            period: period.max(MIN_BLINK_PERIOD),
        }
    }

    /// Blink period in use.
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_visible(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Whether the blink phase is currently On (reverse video drawn).
    pub fn is_blink_on(&self) -> bool {
        self.blink_on.load(Ordering::Acquire)
    }

    /// Combine visibility and phase with an offset for the projection.
    pub fn view(&self, position: usize) -> CursorView {
        CursorView {
            enabled: self.is_visible(),
            blink_on: self.is_blink_on(),
            position,
        }
    }

    /// Make the cursor visible and start blinking. No-op if already visible.
    pub fn show(&self) {
        let mut task = self.task.lock();
        if self.is_visible() {
            return;
        }
        log::debug!("cursor: show");
        self.start(&mut task);
    }

    /// Stop blinking and hide the cursor. No-op if already hidden.
    pub fn hide(&self) {
        let mut task = self.task.lock();
        if !self.is_visible() {
            return;
        }
        log::debug!("cursor: hide");
        if let Some(running) = task.take() {
            running.stop();
        }
        self.enabled.store(false, Ordering::Release);
        let was_on = self.blink_on.swap(false, Ordering::AcqRel);
        drop(task);
        if was_on {
            // The block was on screen; it has to be erased.
            self.dirty.notify();
        }
    }

    /// Restart the blink from phase Off. No-op while hidden.
    ///
    /// Called after every offset change so a moving cursor is drawn
    /// immediately instead of mid-blink.
    pub fn restart(&self) {
        let mut task = self.task.lock();
        if !self.is_visible() {
            return;
        }
        log::trace!("cursor: restart blink");
        if let Some(running) = task.take() {
            running.stop();
        }
        self.start(&mut task);
    }

    fn start(&self, slot: &mut Option<BlinkTask>) {
        self.blink_on.store(false, Ordering::Release);
        self.enabled.store(true, Ordering::Release);
        match BlinkTask::spawn(Arc::clone(&self.blink_on), Arc::clone(&self.dirty), self.period) {
            Ok(task) => *slot = Some(task),
            Err(e) => log::warn!("cursor: failed to spawn blink thread, cursor will not blink: {e}"),
        }
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        if let Some(running) = self.task.get_mut().take() {
            running.stop();
        }
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("enabled", &self.is_visible())
            .field("blink_on", &self.is_blink_on())
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
