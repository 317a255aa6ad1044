//! Spin animation: an ease-out timeline that ends with the pointer on a
//! winner drawn before the first frame.
//!
//! The host calls [`SpinAnimator::spin`] once, then [`SpinAnimator::advance`]
//! on every animation frame with the milliseconds elapsed since the spin
//! started. Nothing here reads a clock.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::active::{resolve_active_entries, ActiveEntry};
use crate::draw::draw_index;
use crate::entry::Entry;
use crate::error::{WheelError, WheelResult};
use crate::layout::{compute_layout, Sector};
use crate::pointer::normalize_angle;

pub const DEFAULT_SPIN_STRENGTH: u32 = 12;
pub const DEFAULT_SPIN_DURATION_SECS: f64 = 3.5;

/// Extra revolutions and duration of one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    spin_strength: u32,
    spin_duration: f64,
}

impl SpinConfig {
    /// `spin_strength` is at least one revolution; a duration that is not a
    /// positive number of seconds falls back to the default.
    pub fn new(spin_strength: u32, spin_duration: f64) -> Self {
        let spin_strength = if spin_strength == 0 {
            log::warn!("spin strength 0 raised to 1 revolution");
            1
        } else {
            spin_strength
        };
        let spin_duration = if spin_duration.is_finite() && spin_duration > 0.0 {
            spin_duration
        } else {
            log::warn!(
                "spin duration {} is not positive, using {}s",
                spin_duration,
                DEFAULT_SPIN_DURATION_SECS
            );
            DEFAULT_SPIN_DURATION_SECS
        };
        Self {
            spin_strength,
            spin_duration,
        }
    }

    pub fn spin_strength(&self) -> u32 {
        self.spin_strength
    }

    pub fn spin_duration_secs(&self) -> f64 {
        self.spin_duration
    }

    pub fn duration_ms(&self) -> f64 {
        self.spin_duration * 1000.0
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_STRENGTH, DEFAULT_SPIN_DURATION_SECS)
    }
}

// Easing function for smooth deceleration
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// What the host should paint for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinFrame {
    pub angle: f64,
    pub progress: f64,
    pub done: bool,
    /// Set only on the final frame.
    pub winner: Option<ActiveEntry>,
}

/// A spin in flight. The layout and winner are frozen when the spin starts,
/// so edits to the entry list cannot change where it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinHandle {
    sectors: Vec<Sector>,
    winner: ActiveEntry,
    start_angle: f64,
    total_delta: f64,
    duration_ms: f64,
}

impl SpinHandle {
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn winner(&self) -> &ActiveEntry {
        &self.winner
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn total_delta(&self) -> f64 {
        self.total_delta
    }

    pub fn target_angle(&self) -> f64 {
        self.start_angle + self.total_delta
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Frame for `elapsed_ms` since the spin started. Pure: the same elapsed
    /// time always yields the same frame.
    pub fn advance(&self, elapsed_ms: f64) -> SpinFrame {
        let progress = if elapsed_ms.is_nan() {
            0.0
        } else {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        let done = progress >= 1.0;
        let angle = if done {
            self.target_angle()
        } else {
            self.start_angle + self.total_delta * ease_out_cubic(progress)
        };
        SpinFrame {
            angle,
            progress,
            done,
            winner: done.then(|| self.winner.clone()),
        }
    }
}

/// Draws a winner and plans the rotation that lands on it.
///
/// The wheel starts from `start_angle` reduced into `[0, 2π)`, turns forward
/// the minimal amount that brings the winner's sector midpoint under the
/// pointer, plus `spin_strength` whole revolutions.
pub fn start_spin<F>(
    entries: &[Entry],
    enabled_tags: &BTreeSet<String>,
    config: SpinConfig,
    start_angle: f64,
    rng: F,
) -> WheelResult<SpinHandle>
where
    F: FnMut() -> f64,
{
    let active = resolve_active_entries(entries, enabled_tags);
    let winner_index = draw_index(&active, rng)?;
    let sectors = compute_layout(&active);
    let winner_sector = sectors.get(winner_index).ok_or(WheelError::NoSector {
        angle: start_angle,
        position: f64::NAN,
    })?;

    let start_angle = normalize_angle(start_angle);
    let landing = normalize_angle(-winner_sector.midpoint());
    let forward = normalize_angle(landing - start_angle);
    let total_delta = forward + TAU * f64::from(config.spin_strength());
    let winner = winner_sector.entry.clone();

    Ok(SpinHandle {
        sectors,
        winner,
        start_angle,
        total_delta,
        duration_ms: config.duration_ms(),
    })
}

/// Result of asking the animator to spin.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinStart {
    Started { winner: ActiveEntry, target_angle: f64 },
    /// A spin is already running; the request was ignored.
    AlreadySpinning,
}

/// `Idle -> Spinning -> Idle` guard around [`SpinHandle`] that also keeps the
/// wheel's resting angle between spins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinAnimator {
    angle: f64,
    spin: Option<SpinHandle>,
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle(angle: f64) -> Self {
        Self { angle, spin: None }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn current(&self) -> Option<&SpinHandle> {
        self.spin.as_ref()
    }

    pub fn spin<F>(
        &mut self,
        entries: &[Entry],
        enabled_tags: &BTreeSet<String>,
        config: SpinConfig,
        rng: F,
    ) -> WheelResult<SpinStart>
    where
        F: FnMut() -> f64,
    {
        if self.spin.is_some() {
            log::debug!("spin requested while spinning, ignored");
            return Ok(SpinStart::AlreadySpinning);
        }

        let handle = start_spin(entries, enabled_tags, config, self.angle, rng)?;
        log::debug!(
            "spinning to {:?} over {}ms ({} rad)",
            handle.winner().text,
            handle.duration_ms(),
            handle.total_delta()
        );

        self.angle = handle.start_angle();
        let started = SpinStart::Started {
            winner: handle.winner().clone(),
            target_angle: handle.target_angle(),
        };
        self.spin = Some(handle);
        Ok(started)
    }

    /// Advances the running spin. Returns `None` while idle.
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<SpinFrame> {
        let frame = self.spin.as_ref()?.advance(elapsed_ms);
        self.angle = frame.angle;
        if frame.done {
            self.spin = None;
            if let Some(winner) = &frame.winner {
                log::debug!("spin finished on {:?}", winner.text);
            }
        }
        Some(frame)
    }

    /// Stops a running spin where it is, without producing a winner.
    pub fn cancel(&mut self) -> bool {
        self.spin.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::resolve_pointer;

    fn fruit() -> Vec<Entry> {
        vec![Entry::new("Apple", 1, ""), Entry::new("Banana", 3, "")]
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_config_sanitizing() {
        let config = SpinConfig::new(0, -2.0);
        assert_eq!(config.spin_strength(), 1);
        assert_eq!(config.spin_duration_secs(), DEFAULT_SPIN_DURATION_SECS);
        assert_eq!(SpinConfig::new(3, f64::NAN).duration_ms(), 3500.0);
        assert_eq!(SpinConfig::new(5, 2.0).duration_ms(), 2000.0);
    }

    #[test]
    fn test_plan_lands_on_winner() {
        let config = SpinConfig::new(12, 3.5);
        for &start in &[0.0, 1.0, 5.5, -3.0, 250.0] {
            let handle = start_spin(&fruit(), &BTreeSet::new(), config, start, || 0.9).unwrap();
            assert_eq!(handle.winner().text, "Banana");
            assert!(handle.total_delta() >= TAU * 12.0);
            assert!(handle.total_delta() < TAU * 13.0);
            let landed = resolve_pointer(handle.sectors(), handle.target_angle()).unwrap();
            assert_eq!(landed.entry, *handle.winner());
        }
    }

    #[test]
    fn test_advance_is_deterministic() {
        let handle =
            start_spin(&fruit(), &BTreeSet::new(), SpinConfig::default(), 0.3, || 0.1).unwrap();
        assert_eq!(handle.advance(1234.0), handle.advance(1234.0));
        assert_eq!(handle.advance(-50.0).angle, handle.start_angle());
        assert!(handle.advance(10_000.0).done);
        assert_eq!(handle.advance(f64::NAN).progress, 0.0);
    }

    #[test]
    fn test_animator_guards_double_spin() {
        let mut animator = SpinAnimator::new();
        let config = SpinConfig::default();
        let started = animator.spin(&fruit(), &BTreeSet::new(), config, || 0.9).unwrap();
        assert!(matches!(started, SpinStart::Started { ref winner, .. } if winner.text == "Banana"));

        let again = animator.spin(&fruit(), &BTreeSet::new(), config, || 0.1).unwrap();
        assert_eq!(again, SpinStart::AlreadySpinning);
        assert_eq!(animator.current().unwrap().winner().text, "Banana");
    }

    #[test]
    fn test_animator_refuses_empty_selection() {
        let mut animator = SpinAnimator::with_angle(1.5);
        let entries = vec![Entry::new("X", 1, "a")];
        let result = animator.spin(&entries, &BTreeSet::new(), SpinConfig::default(), || 0.5);
        assert_eq!(result, Err(WheelError::EmptySelection));
        assert!(!animator.is_spinning());
        assert_eq!(animator.angle(), 1.5);
        assert_eq!(animator.advance(100.0), None);
    }

    #[test]
    fn test_animator_completes_and_returns_to_idle() {
        let mut animator = SpinAnimator::new();
        animator
            .spin(&fruit(), &BTreeSet::new(), SpinConfig::new(2, 1.0), || 0.1)
            .unwrap();
        let mid = animator.advance(500.0).unwrap();
        assert!(!mid.done);
        assert_eq!(mid.winner, None);

        let last = animator.advance(1000.0).unwrap();
        assert!(last.done);
        assert_eq!(last.winner.map(|w| w.text), Some("Apple".to_string()));
        assert!(!animator.is_spinning());
        assert_eq!(animator.angle(), last.angle);
    }

    #[test]
    fn test_cancel_returns_to_idle_without_winner() {
        let mut animator = SpinAnimator::new();
        animator
            .spin(&fruit(), &BTreeSet::new(), SpinConfig::default(), || 0.5)
            .unwrap();
        let frame = animator.advance(700.0).unwrap();
        assert!(animator.cancel());
        assert!(!animator.is_spinning());
        assert_eq!(animator.angle(), frame.angle);
        assert_eq!(animator.advance(10_000.0), None);
        assert!(!animator.cancel());
    }

    #[test]
    fn test_second_spin_starts_from_resting_angle() {
        let mut animator = SpinAnimator::new();
        let config = SpinConfig::new(1, 1.0);
        animator.spin(&fruit(), &BTreeSet::new(), config, || 0.1).unwrap();
        let first = animator.advance(1000.0).unwrap();

        animator.spin(&fruit(), &BTreeSet::new(), config, || 0.9).unwrap();
        let handle = animator.current().unwrap();
        assert!((handle.start_angle() - normalize_angle(first.angle)).abs() < 1e-12);
        let last = animator.advance(1000.0).unwrap();
        assert_eq!(last.winner.map(|w| w.text), Some("Banana".to_string()));
    }
}
