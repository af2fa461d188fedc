//! Spawn timers
//!
//! Two independent repeating timers drive spawning. Every firing is handed
//! out as a [`TimerHandle`] tagged with the run that owns the timer, so a
//! handle that outlives its run (restart, game over) is recognized as stale
//! and ignored by the spawn handlers.

use serde::{Deserialize, Serialize};

/// Which spawn timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    Obstacle,
    PowerUp,
}

/// Cancellation token for one timer of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub run_id: u32,
    pub kind: TimerKind,
}

/// A repeating timer with a mutable interval
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub interval_ms: f32,
    /// Time accumulated toward the next firing
    pub accumulated_ms: f32,
    removed: bool,
}

impl SpawnTimer {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0.0,
            removed: false,
        }
    }

    pub fn advance(&mut self, delta_ms: f32) {
        if !self.removed {
            self.accumulated_ms += delta_ms.max(0.0);
        }
    }

    /// Consume one period if due
    pub fn poll(&mut self) -> bool {
        if self.removed || self.accumulated_ms < self.interval_ms {
            return false;
        }
        self.accumulated_ms -= self.interval_ms;
        true
    }

    /// Stop permanently; pending time is discarded
    pub fn remove(&mut self) {
        self.removed = true;
        self.accumulated_ms = 0.0;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

/// The obstacle and power-up timers of one run
#[derive(Debug, Clone)]
pub struct SpawnTimers {
    run_id: u32,
    pub obstacle: SpawnTimer,
    pub power_up: SpawnTimer,
}

impl SpawnTimers {
    pub fn new(run_id: u32, obstacle_interval_ms: f32, power_up_interval_ms: f32) -> Self {
        Self {
            run_id,
            obstacle: SpawnTimer::new(obstacle_interval_ms),
            power_up: SpawnTimer::new(power_up_interval_ms),
        }
    }

    pub fn advance(&mut self, delta_ms: f32) {
        self.obstacle.advance(delta_ms);
        self.power_up.advance(delta_ms);
    }

    /// Next due firing, obstacles first. Call until `None`: the obstacle
    /// interval may shrink between firings.
    pub fn poll_due(&mut self) -> Option<TimerHandle> {
        if self.obstacle.poll() {
            return Some(self.handle(TimerKind::Obstacle));
        }
        if self.power_up.poll() {
            return Some(self.handle(TimerKind::PowerUp));
        }
        None
    }

    pub fn handle(&self, kind: TimerKind) -> TimerHandle {
        TimerHandle {
            run_id: self.run_id,
            kind,
        }
    }

    /// True if `handle` belongs to this run and its timer is still live
    pub fn accepts(&self, handle: TimerHandle) -> bool {
        handle.run_id == self.run_id && !self.get(handle.kind).is_removed()
    }

    pub fn get(&self, kind: TimerKind) -> &SpawnTimer {
        match kind {
            TimerKind::Obstacle => &self.obstacle,
            TimerKind::PowerUp => &self.power_up,
        }
    }

    pub fn remove_all(&mut self) {
        self.obstacle.remove();
        self.power_up.remove();
    }

    pub fn all_removed(&self) -> bool {
        self.obstacle.is_removed() && self.power_up.is_removed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_each_period() {
        let mut timer = SpawnTimer::new(100.0);
        timer.advance(99.0);
        assert!(!timer.poll());
        timer.advance(1.0);
        assert!(timer.poll());
        assert!(!timer.poll());
    }

    #[test]
    fn test_large_delta_fires_repeatedly() {
        let mut timer = SpawnTimer::new(100.0);
        timer.advance(350.0);
        let fired = std::iter::from_fn(|| timer.poll().then_some(())).count();
        assert_eq!(fired, 3);
        assert!((timer.accumulated_ms - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_removed_timer_never_fires() {
        let mut timer = SpawnTimer::new(100.0);
        timer.advance(250.0);
        timer.remove();
        timer.advance(1000.0);
        assert!(!timer.poll());
    }

    #[test]
    fn test_obstacle_polled_first() {
        let mut timers = SpawnTimers::new(1, 100.0, 100.0);
        timers.advance(100.0);
        assert_eq!(timers.poll_due().map(|h| h.kind), Some(TimerKind::Obstacle));
        assert_eq!(timers.poll_due().map(|h| h.kind), Some(TimerKind::PowerUp));
        assert_eq!(timers.poll_due(), None);
    }

    #[test]
    fn test_stale_handles_rejected() {
        let old = SpawnTimers::new(1, 100.0, 100.0);
        let stale = old.handle(TimerKind::Obstacle);
        let mut current = SpawnTimers::new(2, 100.0, 100.0);
        assert!(!current.accepts(stale));
        let fresh = current.handle(TimerKind::PowerUp);
        assert!(current.accepts(fresh));
        current.remove_all();
        assert!(!current.accepts(fresh));
        assert!(current.all_removed());
    }
}
