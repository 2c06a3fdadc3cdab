//! # Auto-advance state machine
//!
//! When the admin stops typing on a complete `basic` or `contact` tab, the form
//! moves on by itself: after a quiet period of [`QUIET_PERIOD`] a dismissible
//! countdown from [`COUNTDOWN_FROM`] appears, ticks down to zero, and the next tab
//! is shown right after the zero frame.
//!
//! The machine owns no timers. Every transition that needs one returns a
//! [`TimerRequest`] tagged with a generation; the component sleeps for the
//! requested delay and reports back with that generation. Any cancellation bumps
//! the generation, so a timer that fires late is recognised as stale and ignored.
//!
//! ```text
//!            evaluate(complete)              quiet_elapsed
//!   Idle ─────────────────────────▶ Armed ─────────────────▶ Counting(5)
//!    ▲                                │                          │ tick
//!    │ interact / incomplete / teardown                          ▼
//!    └────────────────────────────────┴──────────────────── Counting(n-1) … 0 ─finish─▶ Advance
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use super::FormTab;

/// Inactivity required before the countdown starts.
pub const QUIET_PERIOD: Duration = Duration::from_secs(3);
/// First number shown by the countdown.
pub const COUNTDOWN_FROM: u32 = 5;
/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Waiting out the quiet period.
    Armed { generation: u64 },
    /// Countdown visible with `remaining` seconds left.
    Counting { generation: u64, remaining: u32 },
}

/// A one-shot timer the component has to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    Quiet { generation: u64, delay: Duration },
    Tick { generation: u64 },
    /// The counter shows zero; switch tabs on the next turn of the event loop.
    Finish { generation: u64 },
}

impl TimerRequest {
    pub fn generation(&self) -> u64 {
        match self {
            TimerRequest::Quiet { generation, .. }
            | TimerRequest::Tick { generation }
            | TimerRequest::Finish { generation } => *generation,
        }
    }

    pub fn delay(&self) -> Duration {
        match self {
            TimerRequest::Quiet { delay, .. } => *delay,
            TimerRequest::Tick { .. } => TICK_INTERVAL,
            TimerRequest::Finish { .. } => Duration::ZERO,
        }
    }
}

/// What the component must do after feeding an event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// Start this timer, replacing any pending one.
    Schedule(TimerRequest),
    /// Drop every pending timer and hide the countdown.
    Cancel,
    /// Countdown finished: drop timers, hide the countdown, show this tab.
    Advance(FormTab),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoAdvance {
    phase: Phase,
    generation: u64,
    last_interaction: DateTime<Utc>,
    quiet_period: Duration,
    countdown_from: u32,
    closed: bool,
}

impl AutoAdvance {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            last_interaction: now,
            quiet_period: QUIET_PERIOD,
            countdown_from: COUNTDOWN_FROM,
            closed: false,
        }
    }

    /// Override the timing constants.
    pub fn with_timing(mut self, quiet_period: Duration, countdown_from: u32) -> Self {
        self.quiet_period = quiet_period;
        self.countdown_from = countdown_from.max(1);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_interaction(&self) -> DateTime<Utc> {
        self.last_interaction
    }

    /// Seconds left on the visible countdown, if any.
    pub fn remaining(&self) -> Option<u32> {
        match self.phase {
            Phase::Counting { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Re-evaluate after the values or the active tab changed.
    pub fn evaluate(&mut self, tab: FormTab, complete: bool) -> Transition {
        if self.closed {
            return Transition::Unchanged;
        }
        if !(tab.auto_advances() && complete) {
            return self.reset();
        }
        if self.phase != Phase::Idle {
            return Transition::Unchanged;
        }
        self.arm(self.quiet_period)
    }

    /// Focus, change, key press, explicit tab click, or dismissing the countdown.
    pub fn interact(&mut self, now: DateTime<Utc>) -> Transition {
        self.last_interaction = now;
        self.reset()
    }

    /// The quiet timer of `generation` fired.
    pub fn quiet_elapsed(
        &mut self,
        generation: u64,
        tab: FormTab,
        complete: bool,
        now: DateTime<Utc>,
    ) -> Transition {
        if self.closed || self.phase != (Phase::Armed { generation }) {
            return Transition::Unchanged;
        }
        if !(tab.auto_advances() && complete) {
            return self.reset();
        }

        let quiet = TimeDelta::from_std(self.quiet_period).unwrap_or(TimeDelta::MAX);
        let idle_for = now - self.last_interaction;
        if idle_for < quiet {
            // Fired early relative to the last interaction; wait out the rest.
            let rest = (quiet - idle_for).to_std().unwrap_or(self.quiet_period);
            self.phase = Phase::Idle;
            return self.arm(rest);
        }

        self.phase = Phase::Counting {
            generation,
            remaining: self.countdown_from,
        };
        Transition::Schedule(TimerRequest::Tick { generation })
    }

    /// A countdown tick of `generation` fired. Completion is checked again so a
    /// tab that became invalid mid-countdown never advances.
    pub fn tick(&mut self, generation: u64, tab: FormTab, complete: bool) -> Transition {
        if self.closed {
            return Transition::Unchanged;
        }
        let Phase::Counting {
            generation: current,
            remaining,
        } = self.phase
        else {
            return Transition::Unchanged;
        };
        if current != generation || remaining == 0 {
            return Transition::Unchanged;
        }
        if !(tab.auto_advances() && complete) {
            return self.reset();
        }

        let remaining = remaining - 1;
        self.phase = Phase::Counting {
            generation,
            remaining,
        };
        if remaining > 0 {
            Transition::Schedule(TimerRequest::Tick { generation })
        } else {
            Transition::Schedule(TimerRequest::Finish { generation })
        }
    }

    /// The zero frame of `generation` has been shown.
    pub fn finish(&mut self, generation: u64, tab: FormTab, complete: bool) -> Transition {
        if self.closed || self.phase != (Phase::Counting { generation, remaining: 0 }) {
            return Transition::Unchanged;
        }
        if !(tab.auto_advances() && complete) {
            return self.reset();
        }

        self.reset();
        match tab.next() {
            Some(next) => Transition::Advance(next),
            None => Transition::Cancel,
        }
    }

    /// The form is going away. Idempotent; nothing is scheduled afterwards.
    pub fn teardown(&mut self) -> Transition {
        if self.closed {
            return Transition::Unchanged;
        }
        self.closed = true;
        self.generation += 1;
        let was_idle = self.phase == Phase::Idle;
        self.phase = Phase::Idle;
        if was_idle {
            Transition::Unchanged
        } else {
            Transition::Cancel
        }
    }

    fn arm(&mut self, delay: Duration) -> Transition {
        self.generation += 1;
        let generation = self.generation;
        self.phase = Phase::Armed { generation };
        Transition::Schedule(TimerRequest::Quiet { generation, delay })
    }

    fn reset(&mut self) -> Transition {
        self.generation += 1;
        if self.phase == Phase::Idle {
            return Transition::Unchanged;
        }
        self.phase = Phase::Idle;
        Transition::Cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn secs(n: i64) -> DateTime<Utc> {
        t0() + TimeDelta::seconds(n)
    }

    fn quiet_generation(t: Transition) -> u64 {
        match t {
            Transition::Schedule(TimerRequest::Quiet { generation, delay }) => {
                assert_eq!(delay, QUIET_PERIOD);
                generation
            }
            other => panic!("expected quiet timer, got {other:?}"),
        }
    }

    /// Drive a countdown from the start, returning the transition of the last tick.
    fn run_ticks(m: &mut AutoAdvance, generation: u64, tab: FormTab, ticks: u32) -> Transition {
        let mut last = Transition::Unchanged;
        for _ in 0..ticks {
            last = m.tick(generation, tab, true);
        }
        last
    }

    #[test]
    fn test_arms_only_when_complete_on_advancing_tab() {
        let mut m = AutoAdvance::new(t0());
        assert_eq!(m.evaluate(FormTab::Basic, false), Transition::Unchanged);
        assert!(m.is_idle());

        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));
        assert_eq!(m.phase(), Phase::Armed { generation });

        // Already armed: a second evaluation does not schedule again.
        assert_eq!(m.evaluate(FormTab::Basic, true), Transition::Unchanged);
    }

    #[test]
    fn test_countdown_starts_only_after_quiet_period() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));

        // Someone typed at t=2 without the change reaching the machine as a cancel.
        m.last_interaction = secs(2);
        let t = m.quiet_elapsed(generation, FormTab::Basic, true, secs(3));
        match t {
            Transition::Schedule(TimerRequest::Quiet { delay, .. }) => {
                assert_eq!(delay, Duration::from_secs(2));
            }
            other => panic!("expected re-armed quiet timer, got {other:?}"),
        }
        assert_eq!(m.remaining(), None);

        let Phase::Armed { generation } = m.phase() else {
            panic!("not armed");
        };
        let t = m.quiet_elapsed(generation, FormTab::Basic, true, secs(5));
        assert_eq!(t, Transition::Schedule(TimerRequest::Tick { generation }));
        assert_eq!(m.remaining(), Some(COUNTDOWN_FROM));
    }

    #[test]
    fn test_five_ticks_reach_zero_then_advance_exactly_once() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));
        m.quiet_elapsed(generation, FormTab::Basic, true, secs(3));

        let last = run_ticks(&mut m, generation, FormTab::Basic, 4);
        assert_eq!(last, Transition::Schedule(TimerRequest::Tick { generation }));
        assert_eq!(m.remaining(), Some(1));

        let fifth = m.tick(generation, FormTab::Basic, true);
        assert_eq!(fifth, Transition::Schedule(TimerRequest::Finish { generation }));
        assert_eq!(m.remaining(), Some(0));
        assert_eq!(TimerRequest::Finish { generation }.delay(), Duration::ZERO);

        // A duplicate tick while showing zero does nothing.
        assert_eq!(m.tick(generation, FormTab::Basic, true), Transition::Unchanged);

        assert_eq!(
            m.finish(generation, FormTab::Basic, true),
            Transition::Advance(FormTab::Contact)
        );
        assert!(m.is_idle());

        assert_eq!(m.finish(generation, FormTab::Basic, true), Transition::Unchanged);
        assert_eq!(m.tick(generation, FormTab::Basic, true), Transition::Unchanged);
    }

    #[test]
    fn test_tab_turning_incomplete_at_zero_does_not_advance() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));
        m.quiet_elapsed(generation, FormTab::Basic, true, secs(3));
        run_ticks(&mut m, generation, FormTab::Basic, COUNTDOWN_FROM);

        assert_eq!(m.finish(generation, FormTab::Basic, false), Transition::Cancel);
        assert!(m.is_idle());
    }

    #[test]
    fn test_contact_advances_to_academic() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Contact, true));
        m.quiet_elapsed(generation, FormTab::Contact, true, secs(4));
        assert_eq!(
            run_ticks(&mut m, generation, FormTab::Contact, COUNTDOWN_FROM),
            Transition::Schedule(TimerRequest::Finish { generation })
        );
        assert_eq!(
            m.finish(generation, FormTab::Contact, true),
            Transition::Advance(FormTab::Academic)
        );
    }

    #[test]
    fn test_never_arms_on_academic_or_social() {
        let mut m = AutoAdvance::new(t0());
        assert_eq!(m.evaluate(FormTab::Academic, true), Transition::Unchanged);
        assert_eq!(m.evaluate(FormTab::Social, true), Transition::Unchanged);
        assert!(m.is_idle());
    }

    #[test]
    fn test_interaction_cancels_countdown_and_stales_timers() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));
        m.quiet_elapsed(generation, FormTab::Basic, true, secs(3));
        m.tick(generation, FormTab::Basic, true);

        assert_eq!(m.interact(secs(5)), Transition::Cancel);
        assert!(m.is_idle());
        assert_eq!(m.last_interaction(), secs(5));

        // The tick that was already in flight is ignored.
        assert_eq!(m.tick(generation, FormTab::Basic, true), Transition::Unchanged);
        assert_eq!(
            m.quiet_elapsed(generation, FormTab::Basic, true, secs(10)),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_tab_change_cancels_armed_timer() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));
        assert_eq!(m.evaluate(FormTab::Academic, true), Transition::Cancel);
        assert_eq!(
            m.quiet_elapsed(generation, FormTab::Academic, true, secs(3)),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_tab_turning_incomplete_aborts_countdown() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));
        m.quiet_elapsed(generation, FormTab::Basic, true, secs(3));
        m.tick(generation, FormTab::Basic, true);

        assert_eq!(m.tick(generation, FormTab::Basic, false), Transition::Cancel);
        assert!(m.is_idle());
    }

    #[test]
    fn test_teardown_is_idempotent_and_final() {
        let mut m = AutoAdvance::new(t0());
        let generation = quiet_generation(m.evaluate(FormTab::Basic, true));

        assert_eq!(m.teardown(), Transition::Cancel);
        assert_eq!(m.teardown(), Transition::Unchanged);

        assert_eq!(
            m.quiet_elapsed(generation, FormTab::Basic, true, secs(3)),
            Transition::Unchanged
        );
        assert_eq!(m.evaluate(FormTab::Basic, true), Transition::Unchanged);
        assert!(m.is_idle());
    }

    #[test]
    fn test_custom_timing() {
        let mut m = AutoAdvance::new(t0()).with_timing(Duration::from_secs(1), 2);
        let generation = match m.evaluate(FormTab::Basic, true) {
            Transition::Schedule(req) => {
                assert_eq!(req.delay(), Duration::from_secs(1));
                req.generation()
            }
            other => panic!("unexpected {other:?}"),
        };
        m.quiet_elapsed(generation, FormTab::Basic, true, secs(1));
        run_ticks(&mut m, generation, FormTab::Basic, 2);
        assert_eq!(m.remaining(), Some(0));
        assert_eq!(
            m.finish(generation, FormTab::Basic, true),
            Transition::Advance(FormTab::Contact)
        );
    }
}
