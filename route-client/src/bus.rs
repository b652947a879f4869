//! Typed notification bus.
//!
//! Components communicate through `AppEvent`s published on an MPSC
//! channel. Delivery order is publish order, and the orchestrator's
//! event loop finishes handling one event (including its awaits) before
//! dequeuing the next, so no two workflows interleave their renders.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::{Coordinate, RouteCandidate, RoutePreference};

/// A notification raised by the UI or the renderer.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A point was picked on the canvas.
    PointSelected { point: Coordinate },

    /// The rider submitted a route calculation request.
    RouteCalculationRequested {
        origin: Coordinate,
        destination: Coordinate,
        preference: RoutePreference,
    },

    /// A rendered route path was tapped.
    RouteSelected {
        route: RouteCandidate,
        index: usize,
    },

    /// The rider asked to clear the session.
    ClearRequested,
}

/// Publishing handle for the bus. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventBus {
    /// Publishes an event; delivery preserves publish order.
    pub fn publish(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            warn!("event published after the bus was closed");
        }
    }
}

/// Receiving end of the bus, consumed by the orchestrator's event loop.
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventStream {
    /// Waits for the next event; `None` once every publisher is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Takes the next already-queued event without waiting.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }
}

impl futures::Stream for EventStream {
    type Item = AppEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<AppEvent>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// Creates a connected bus and stream.
pub fn event_channel() -> (EventBus, EventStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventBus { tx }, EventStream { rx })
}
