//! Frame-driven timers
//!
//! Timers are plain values advanced by their owner once per frame. There is
//! no global registry and no callback registration: completion is observed
//! from the return value of [`Timer::tick`], or through the ids handed back
//! by [`TimerSet::tick`].

/// Errors that can occur when constructing a timer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimerError {
    #[error("timer duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
}

/// A countdown driven by per-frame deltas.
///
/// One-shot by default; a looping timer re-arms when it fires, dropping any
/// remainder past its duration, and fires at most once per tick. Timers
/// follow game time unless switched to real time, in which case the owner
/// feeds them the unscaled delta.
#[derive(Debug, Clone)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
    looped: bool,
    uses_real_time: bool,
    paused: bool,
    completed: bool,
    cancelled: bool,
}

impl Timer {
    /// Create a one-shot timer that fires after `duration` seconds.
    pub fn new(duration: f32) -> Result<Self, TimerError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TimerError::InvalidDuration(duration));
        }
        Ok(Self {
            duration,
            elapsed: 0.0,
            looped: false,
            uses_real_time: false,
            paused: false,
            completed: false,
            cancelled: false,
        })
    }

    /// Create a timer that fires every `duration` seconds.
    pub fn looping(duration: f32) -> Result<Self, TimerError> {
        let mut timer = Self::new(duration)?;
        timer.looped = true;
        Ok(timer)
    }

    /// Switch the timer to real time (unscaled deltas).
    pub fn real_time(mut self) -> Self {
        self.uses_real_time = true;
        self
    }

    /// Advance the timer by `dt` seconds. Returns true on the tick the
    /// timer fires; a paused, completed or cancelled timer never fires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.paused || self.is_done() {
            return false;
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed < self.duration {
            return false;
        }

        if self.looped {
            self.elapsed = 0.0;
        } else {
            self.completed = true;
        }
        true
    }

    /// Pause the timer, holding its progress.
    pub fn pause(&mut self) {
        if !self.is_done() {
            self.paused = true;
        }
    }

    /// Resume a paused timer from the same progress.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Stop the timer for good. It will never fire again.
    pub fn cancel(&mut self) {
        if !self.completed {
            self.cancelled = true;
        }
    }

    /// Total duration of one cycle, in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time elapsed in the current cycle, clamped to the duration.
    pub fn elapsed(&self) -> f32 {
        self.elapsed.min(self.duration)
    }

    /// Time remaining in the current cycle, in seconds.
    pub fn remaining(&self) -> f32 {
        self.duration - self.elapsed()
    }

    /// Progress through the current cycle, 0.0 to 1.0.
    pub fn ratio_complete(&self) -> f32 {
        self.elapsed() / self.duration
    }

    /// Remaining fraction of the current cycle, 1.0 to 0.0.
    pub fn ratio_remaining(&self) -> f32 {
        1.0 - self.ratio_complete()
    }

    /// Whether the timer loops when it fires.
    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// Whether the timer follows real time instead of game time.
    pub fn uses_real_time(&self) -> bool {
        self.uses_real_time
    }

    /// Whether the timer is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the timer ran to completion.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the timer was cancelled before completing.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether the timer is finished for any reason.
    pub fn is_done(&self) -> bool {
        self.completed || self.cancelled
    }
}

/// Handle to a timer registered in a [`TimerSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// An owned collection of timers advanced together.
///
/// Replaces a scene-global timer manager: each system owns its own set and
/// drives it from its own update. Finished timers are swept after every tick.
#[derive(Debug, Default)]
pub struct TimerSet {
    timers: Vec<(TimerId, Timer)>,
    next_id: u64,
}

impl TimerSet {
    /// Create an empty timer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer, returning its handle.
    pub fn register(&mut self, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push((id, timer));
        id
    }

    /// Look up a live timer by handle.
    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, timer)| timer)
    }

    /// Advance every live timer and sweep out the finished ones.
    ///
    /// `scaled_dt` feeds game-time timers, `real_dt` feeds real-time timers.
    /// Returns the handles of timers that fired this tick, in registration
    /// order.
    pub fn tick(&mut self, scaled_dt: f32, real_dt: f32) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (id, timer) in &mut self.timers {
            let dt = if timer.uses_real_time() {
                real_dt
            } else {
                scaled_dt
            };
            if timer.tick(dt) {
                fired.push(*id);
            }
        }
        self.timers.retain(|(_, timer)| !timer.is_done());
        fired
    }

    /// Cancel a timer by handle. Unknown handles are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        if let Some((_, timer)) = self.timers.iter_mut().find(|(tid, _)| *tid == id) {
            timer.cancel();
        }
    }

    /// Cancel every live timer.
    pub fn cancel_all(&mut self) {
        for (_, timer) in &mut self.timers {
            timer.cancel();
        }
    }

    /// Pause every live timer.
    pub fn pause_all(&mut self) {
        for (_, timer) in &mut self.timers {
            timer.pause();
        }
    }

    /// Resume every live timer.
    pub fn resume_all(&mut self) {
        for (_, timer) in &mut self.timers {
            timer.resume();
        }
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether the set has no live timers.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_duration() {
        assert!(Timer::new(0.0).is_err());
        assert!(Timer::new(-1.0).is_err());
        assert!(Timer::new(f32::NAN).is_err());
        assert!(Timer::new(0.5).is_ok());
    }

    #[test]
    fn one_shot_fires_once() {
        let mut timer = Timer::new(0.1).unwrap();
        assert!(!timer.tick(0.05));
        assert!(timer.tick(0.06));
        assert!(timer.is_completed());
        assert!(!timer.tick(1.0));
    }

    #[test]
    fn looping_rearms_and_drops_remainder() {
        let mut timer = Timer::looping(0.1).unwrap();
        assert!(timer.tick(0.15));
        assert!(!timer.is_done());
        // The 0.05 overshoot was dropped, so a 0.06 step does not fire
        assert!(!timer.tick(0.06));
        assert!(timer.tick(0.05));
    }

    #[test]
    fn pause_holds_progress() {
        let mut timer = Timer::new(0.1).unwrap();
        timer.tick(0.05);
        timer.pause();
        assert!(!timer.tick(1.0));
        assert!((timer.elapsed() - 0.05).abs() < 1e-6);

        timer.resume();
        assert!(timer.tick(0.05));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = Timer::new(0.1).unwrap();
        timer.cancel();
        assert!(!timer.tick(1.0));
        assert!(timer.is_cancelled());
        assert!(!timer.is_completed());
    }

    #[test]
    fn ratio_accessors_clamp() {
        let mut timer = Timer::new(0.2).unwrap();
        timer.tick(0.1);
        assert!((timer.ratio_complete() - 0.5).abs() < 1e-6);
        timer.tick(10.0);
        assert!((timer.ratio_complete() - 1.0).abs() < 1e-6);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn set_reports_fired_and_sweeps_done() {
        let mut set = TimerSet::new();
        let short = set.register(Timer::new(0.1).unwrap());
        let long = set.register(Timer::new(1.0).unwrap());
        let looper = set.register(Timer::looping(0.1).unwrap());

        let fired = set.tick(0.1, 0.1);
        assert_eq!(fired, vec![short, looper]);

        // The one-shot was swept, the looper stays registered
        assert!(set.get(short).is_none());
        assert!(set.get(long).is_some());
        assert!(set.get(looper).is_some());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn set_routes_real_time_deltas() {
        let mut set = TimerSet::new();
        let scaled = set.register(Timer::new(0.1).unwrap());
        let real = set.register(Timer::new(0.1).unwrap().real_time());

        // Game time frozen, real time advancing
        let fired = set.tick(0.0, 0.2);
        assert_eq!(fired, vec![real]);
        assert!(set.get(scaled).is_some());
    }

    #[test]
    fn set_cancel_prevents_firing() {
        let mut set = TimerSet::new();
        let id = set.register(Timer::new(0.1).unwrap());
        set.cancel(id);
        assert!(set.tick(1.0, 1.0).is_empty());
        assert!(set.is_empty());
    }
}
