//! Publish Throttling
//!
//! Pointer-move events fire far faster than the presence channel should
//! see them. The throttle enforces a minimum interval between sends and
//! coalesces everything in between down to the latest value, so the last
//! position always gets out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Presence, PresenceChannel};

/// Minimum-interval throttle with latest-value coalescing
#[derive(Debug)]
pub struct PublishThrottle {
    min_interval: Duration,
    last_sent: Option<Instant>,
    pending: Option<Presence>,
}

impl PublishThrottle {
    /// Interval used for cursor publishing when nothing else is configured
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_sent: None,
            pending: None,
        }
    }

    /// Offer a value for publishing. Returns it when the interval has
    /// elapsed; otherwise parks it as the pending value, replacing any
    /// earlier one.
    pub fn offer(&mut self, presence: Presence) -> Option<Presence> {
        self.offer_at(presence, Instant::now())
    }

    /// Release the parked value once the interval has elapsed
    pub fn flush(&mut self) -> Option<Presence> {
        self.flush_at(Instant::now())
    }

    fn ready(&self, now: Instant) -> bool {
        match self.last_sent {
            None => true,
            Some(last) => now.duration_since(last) >= self.min_interval,
        }
    }

    pub(crate) fn offer_at(&mut self, presence: Presence, now: Instant) -> Option<Presence> {
        if self.ready(now) {
            self.last_sent = Some(now);
            self.pending = None;
            Some(presence)
        } else {
            self.pending = Some(presence);
            None
        }
    }

    pub(crate) fn flush_at(&mut self, now: Instant) -> Option<Presence> {
        if self.pending.is_some() && self.ready(now) {
            self.last_sent = Some(now);
            self.pending.take()
        } else {
            None
        }
    }
}

/// The publish boundary for one participant's cursor.
///
/// Sits between pointer input and the presence channel; board state knows
/// nothing about it, and it knows nothing about board state.
pub struct CursorPublisher {
    channel: Arc<dyn PresenceChannel>,
    throttle: PublishThrottle,
}

impl CursorPublisher {
    pub fn new(channel: Arc<dyn PresenceChannel>) -> Self {
        Self::with_interval(channel, PublishThrottle::DEFAULT_INTERVAL)
    }

    pub fn with_interval(channel: Arc<dyn PresenceChannel>, min_interval: Duration) -> Self {
        Self {
            channel,
            throttle: PublishThrottle::new(min_interval),
        }
    }

    /// Feed a pointer-move event through the throttle
    pub async fn pointer_moved(&mut self, x: i32, y: i32) {
        if let Some(presence) = self.throttle.offer(Presence::at(x, y)) {
            self.channel.publish(presence).await;
        }
    }

    /// Periodic tick: push out a parked position once the interval allows
    pub async fn tick(&mut self) {
        if let Some(presence) = self.throttle.flush() {
            self.channel.publish(presence).await;
        }
    }
}
