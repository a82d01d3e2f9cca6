//! Countdown timer component.
//!
//! Tracks a remaining duration that decreases by one second on each tick of
//! the component's own clock. The timer is a two-state machine: it starts
//! Running and becomes Finished once the remaining time reaches zero, after
//! which further ticks are no-ops and nothing else is scheduled.
//!
//! # Basic Usage
//!
//! ```rust
//! use tickbar::countdown;
//! use std::time::Duration;
//!
//! let timer = countdown::new(Duration::from_secs(90));
//! assert!(!timer.finished());
//! assert_eq!(timer.view(), "01:30");
//! ```
//!
//! Reaching zero does not terminate anything by itself; whoever owns the
//! timer decides what a Finished countdown means.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for countdown instances.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// How often the countdown's own clock fires.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Message emitted by the countdown's one-second clock.
///
/// Each tick carries the identity of the timer that scheduled it so that
/// messages intended for other instances (or stale messages from a previous
/// tick cycle) are rejected rather than double-counted.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Unique identifier of the countdown that generated this tick.
    pub id: i64,

    /// Synchronization tag rejecting ticks from an abandoned cycle.
    tag: i64,
}

/// Countdown timer state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time left until the countdown is Finished. Decreases monotonically,
    /// saturating at zero.
    remaining: Duration,

    id: i64,
    tag: i64,
}

/// Creates a countdown over the given duration, ticking once per second.
pub fn new(timeout: Duration) -> Model {
    Model {
        remaining: timeout,
        id: next_id(),
        tag: 0,
    }
}

impl Model {
    /// The unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Remaining time until the countdown finishes.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether the countdown has reached zero.
    pub fn finished(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Schedules this countdown's next clock tick.
    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Starts the countdown's own ticking. Call once, when the program
    /// initializes.
    pub fn init(&self) -> Cmd {
        self.tick()
    }

    /// Consumes one clock tick, decrementing the remaining time and
    /// scheduling the next tick.
    ///
    /// Foreign messages, ticks addressed to other instances, and stale ticks
    /// are ignored. Once Finished, ticks are no-ops and nothing further is
    /// scheduled.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != 0 && tick_msg.id != self.id {
                return None;
            }

            // A tag from a cycle we no longer recognize would make the clock
            // tick too fast; reject it.
            if tick_msg.tag > 0 && tick_msg.tag != self.tag {
                return None;
            }

            if self.finished() {
                return None;
            }

            self.remaining = self.remaining.saturating_sub(TICK_INTERVAL);
            return Some(self.tick());
        }

        None
    }

    /// Renders the remaining time as zero-padded `MM:SS`.
    ///
    /// Valid in any state; a Finished countdown renders as `00:00`.
    pub fn view(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
