//! Deferred events
//!
//! Delays are measured on the session clock. Due events are handed back at
//! the start of a tick and applied there, never from outside the tick.

/// What to do when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Start fading the power-up with this id
    FadePowerUp(u32),
    /// Start fading the phrase with this id
    FadePhrase(u32),
    /// Finish the game after the keep fell
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scheduled {
    due_ms: f64,
    event: TimerEvent,
}

/// Pending timers in scheduling order
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, event: TimerEvent) {
        self.pending.push(Scheduled {
            due_ms: now_ms + delay_ms,
            event,
        });
    }

    /// Remove and return every event due at `now_ms`, earliest first
    ///
    /// Events due at the same time keep their scheduling order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<TimerEvent> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due_ms <= now_ms {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|s| s.event).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_yet() {
        let mut timers = TimerQueue::default();
        timers.schedule(0.0, 1000.0, TimerEvent::FadePhrase(1));
        assert!(timers.drain_due(999.0).is_empty());
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.drain_due(1000.0), vec![TimerEvent::FadePhrase(1)]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut timers = TimerQueue::default();
        timers.schedule(0.0, 1000.0, TimerEvent::FadePowerUp(2));
        timers.schedule(0.0, 500.0, TimerEvent::GameOver);
        timers.schedule(0.0, 1000.0, TimerEvent::FadePhrase(3));
        assert_eq!(
            timers.drain_due(2000.0),
            vec![
                TimerEvent::GameOver,
                TimerEvent::FadePowerUp(2),
                TimerEvent::FadePhrase(3)
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut timers = TimerQueue::default();
        timers.schedule(0.0, 10.0, TimerEvent::GameOver);
        timers.clear();
        assert!(timers.drain_due(100.0).is_empty());
    }
}
