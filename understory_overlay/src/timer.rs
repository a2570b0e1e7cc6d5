// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance deadlines.
//!
//! Timers are plain deadlines owned by the instance. Nothing runs on its own:
//! the host asks the registry for the [next deadline](crate::InstanceRegistry::next_deadline),
//! schedules one platform timer, and calls
//! [`advance`](crate::InstanceRegistry::advance) when it fires.

use core::time::Duration;

use web_time::Instant;

/// Debounce applied to window resize before re-resolving placement.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// The named timer slots of one instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TimerKind {
    /// Delayed show from a trigger event.
    ShowDelay,
    /// Delayed hide from a trigger event or panel leave.
    HideDelay,
    /// Hide after being visible for the configured delay.
    AutoHide,
    /// Re-resolve placement after resizing settles.
    ResizeDebounce,
}

impl TimerKind {
    const ALL: [Self; 4] = [
        Self::ShowDelay,
        Self::HideDelay,
        Self::AutoHide,
        Self::ResizeDebounce,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::ShowDelay => 0,
            Self::HideDelay => 1,
            Self::AutoHide => 2,
            Self::ResizeDebounce => 3,
        }
    }
}

/// Deadlines for each [`TimerKind`]; at most one pending per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    deadlines: [Option<Instant>; 4],
}

impl Timers {
    /// No timers pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the deadline for `kind`.
    pub fn arm(&mut self, kind: TimerKind, deadline: Instant) {
        self.deadlines[kind.slot()] = Some(deadline);
    }

    /// Clear `kind`. Returns true if it was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines[kind.slot()].take().is_some()
    }

    /// Clear everything.
    pub fn cancel_all(&mut self) {
        self.deadlines = [None; 4];
    }

    /// The deadline for `kind`, if pending.
    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.deadlines[kind.slot()]
    }

    /// Whether `kind` is pending.
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Pending timers whose deadline is at or before `now`, earliest first.
    ///
    /// Equal deadlines keep slot order. Timers are not cleared; the caller
    /// clears each one as it fires.
    pub fn due(&self, now: Instant) -> Vec<(Instant, TimerKind)> {
        let mut out: Vec<_> = TimerKind::ALL
            .into_iter()
            .filter_map(|k| self.deadline(k).map(|d| (d, k)))
            .filter(|(d, _)| *d <= now)
            .collect();
        out.sort_by_key(|(d, _)| *d);
        out
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.deadlines.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_is_sorted_by_deadline_then_slot() {
        let t0 = Instant::now();
        let mut t = Timers::new();
        t.arm(TimerKind::AutoHide, t0 + Duration::from_millis(50));
        t.arm(TimerKind::ShowDelay, t0 + Duration::from_millis(80));
        t.arm(TimerKind::HideDelay, t0 + Duration::from_millis(50));
        t.arm(TimerKind::ResizeDebounce, t0 + Duration::from_millis(500));

        let due: Vec<_> = t
            .due(t0 + Duration::from_millis(100))
            .into_iter()
            .map(|(_, k)| k)
            .collect();
        assert_eq!(
            due,
            vec![
                TimerKind::HideDelay,
                TimerKind::AutoHide,
                TimerKind::ShowDelay
            ]
        );
        assert_eq!(t.next_deadline(), Some(t0 + Duration::from_millis(50)));
    }

    #[test]
    fn arm_replaces_and_cancel_reports() {
        let t0 = Instant::now();
        let mut t = Timers::new();
        t.arm(TimerKind::HideDelay, t0 + Duration::from_millis(10));
        t.arm(TimerKind::HideDelay, t0 + Duration::from_millis(30));
        assert_eq!(
            t.deadline(TimerKind::HideDelay),
            Some(t0 + Duration::from_millis(30))
        );
        assert!(t.cancel(TimerKind::HideDelay));
        assert!(!t.cancel(TimerKind::HideDelay));
        assert!(t.is_empty());
        assert_eq!(t.next_deadline(), None);
    }

    #[test]
    fn nothing_is_due_before_its_deadline() {
        let t0 = Instant::now();
        let mut t = Timers::new();
        t.arm(TimerKind::ShowDelay, t0 + Duration::from_millis(100));
        assert!(t.due(t0 + Duration::from_millis(99)).is_empty());
        assert_eq!(t.due(t0 + Duration::from_millis(100)).len(), 1);
    }
}
