//! Interrupt-safe edge debouncer
//!
//! Sits between a raw edge notification (GPIO interrupt or an edge-waiting
//! task) and the user callback. Three filters apply, in order:
//!
//! 1. Reentrancy guard: an edge arriving while the callback for a previous
//!    edge is still running is dropped, not queued.
//! 2. Level filter: an edge that does not change the logical level is dropped.
//! 3. Time window: an edge within `window_ms` of the last accepted one is
//!    treated as contact bounce and dropped.
//!
//! All state is atomic so one instance can live in a `static` shared between
//! an interrupt context and a task.

use portable_atomic::{AtomicBool, AtomicU64, Ordering};

/// Marker for "no edge accepted yet"
const NEVER: u64 = u64::MAX;

/// Logical key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Key went down
    Pressed,
    /// Key came back up
    Released,
}

/// Debounced edge-driven key
#[derive(Debug)]
pub struct EdgeDebouncer {
    busy: AtomicBool,
    pressed: AtomicBool,
    last_edge_ms: AtomicU64,
    window_ms: u64,
}

impl EdgeDebouncer {
    /// Create a released key with the given bounce window
    pub const fn new(window_ms: u32) -> Self {
        Self {
            busy: AtomicBool::new(false),
            pressed: AtomicBool::new(false),
            last_edge_ms: AtomicU64::new(NEVER),
            window_ms: window_ms as u64,
        }
    }

    /// Logical pressed state
    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }

    /// Whether a callback is currently executing
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Feed a raw transition
    ///
    /// - `pressed`: level after the transition, already converted to logical
    ///   pressed (active-low keys pass `pin.is_low()`)
    /// - `now_ms`: monotonic timestamp of the edge
    /// - `handler`: invoked synchronously with the logical edge if accepted
    ///
    /// Returns `true` if the handler ran.
    pub fn notify<F>(&self, pressed: bool, now_ms: u64, handler: F) -> bool
    where
        F: FnOnce(Edge),
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }

        let edge = self.accept(pressed, now_ms);
        if let Some(edge) = edge {
            handler(edge);
        }

        self.busy.store(false, Ordering::Release);
        edge.is_some()
    }

    fn accept(&self, pressed: bool, now_ms: u64) -> Option<Edge> {
        if pressed == self.pressed.load(Ordering::Relaxed) {
            return None;
        }

        let last = self.last_edge_ms.load(Ordering::Relaxed);
        if last != NEVER && now_ms.saturating_sub(last) < self.window_ms {
            return None;
        }

        self.pressed.store(pressed, Ordering::Relaxed);
        self.last_edge_ms.store(now_ms, Ordering::Relaxed);
        Some(if pressed { Edge::Pressed } else { Edge::Released })
    }
}
