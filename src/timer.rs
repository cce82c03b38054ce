use crate::logger;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Urgency tier of the countdown display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Calm,
    Caution,
    Warning,
    Critical,
}

impl Band {
    pub fn for_remaining(secs: u64) -> Self {
        if secs > 600 {
            Band::Calm
        } else if secs > 300 {
            Band::Caution
        } else if secs > 120 {
            Band::Warning
        } else {
            Band::Critical
        }
    }

    pub fn pulsing(self) -> bool {
        self == Band::Critical
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// Reached zero on this tick. Reported once per countdown.
    Expired,
    /// Already stopped; the tick had no effect.
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    running: bool,
}

impl Countdown {
    pub fn from_minutes(minutes: u64) -> Self {
        let remaining = minutes.saturating_mul(60);
        Self {
            remaining,
            running: remaining > 0,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn band(&self) -> Band {
        Band::for_remaining(self.remaining)
    }

    pub fn display(&self) -> String {
        format!("Time Left: {}", format_clock(self.remaining))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { session_id: u64 },
}

/// Background task sending one `TimerEvent::Tick` per second. Aborted on
/// `cancel` or drop, so a replaced session can never tick again.
#[derive(Debug)]
pub struct Ticker {
    session_id: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Must be called from within a tokio runtime.
    pub fn spawn(session_id: u64, tx: UnboundedSender<TimerEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(TimerEvent::Tick { session_id }).is_err() {
                    break;
                }
            }
        });
        logger::log(&format!("Ticker started for session {}", session_id));
        Self { session_id, handle }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            self.handle.abort();
            logger::log(&format!("Ticker cancelled for session {}", self.session_id));
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
