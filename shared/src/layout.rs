use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::active::{total_weight, ActiveEntry};
use crate::pointer::normalize_angle;

/// Angular span of the wheel assigned to one active entry, in radians of the
/// wheel's own frame. `start_angle` is inclusive, `end_angle` exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub entry: ActiveEntry,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Sector {
    pub fn width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn midpoint(&self) -> f64 {
        self.start_angle + self.width() / 2.0
    }

    pub fn contains(&self, position: f64) -> bool {
        self.start_angle <= position && position < self.end_angle
    }
}

/// Lays the active entries out as contiguous sectors covering `[0, 2π)`.
///
/// Boundaries come from the running integer weight sum, so the last sector
/// always closes at exactly `2π` no matter how many entries there are.
pub fn compute_layout(active: &[ActiveEntry]) -> Vec<Sector> {
    let total = total_weight(active);
    if total == 0 {
        return Vec::new();
    }

    let boundary = |cumulative: u64| cumulative as f64 / total as f64 * TAU;
    let mut cumulative = 0u64;
    active
        .iter()
        .map(|entry| {
            let start_angle = boundary(cumulative);
            cumulative += u64::from(entry.weight);
            Sector {
                entry: entry.clone(),
                start_angle,
                end_angle: boundary(cumulative),
            }
        })
        .collect()
}

/// The rotation that puts the midpoint of sector `index` under the pointer.
pub fn angle_at_sector_midpoint(sectors: &[Sector], index: usize) -> Option<f64> {
    sectors
        .get(index)
        .map(|sector| normalize_angle(-sector.midpoint()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use proptest::prelude::*;

    fn active(weights: &[u32]) -> Vec<ActiveEntry> {
        weights
            .iter()
            .enumerate()
            .map(|(index, &weight)| ActiveEntry {
                index,
                text: format!("entry {}", index),
                weight,
            })
            .collect()
    }

    #[test]
    fn test_apple_banana_widths() {
        let sectors = compute_layout(&active(&[1, 3]));
        assert_eq!(sectors.len(), 2);
        assert!((sectors[0].width() - PI / 2.0).abs() < 1e-12);
        assert!((sectors[1].width() - 3.0 * PI / 2.0).abs() < 1e-12);
        assert_eq!(sectors[0].start_angle, 0.0);
        assert_eq!(sectors[1].end_angle, TAU);
    }

    #[test]
    fn test_empty_layout() {
        assert!(compute_layout(&[]).is_empty());
        assert_eq!(angle_at_sector_midpoint(&[], 0), None);
    }

    #[test]
    fn test_single_entry_covers_wheel() {
        let sectors = compute_layout(&active(&[7]));
        assert_eq!(sectors[0].start_angle, 0.0);
        assert_eq!(sectors[0].end_angle, TAU);
        assert!((sectors[0].midpoint() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_many_entries_close_exactly() {
        let weights: Vec<u32> = (0..997).map(|i| 1 + (i * 31 % 17)).collect();
        let sectors = compute_layout(&active(&weights));
        assert_eq!(sectors.last().map(|s| s.end_angle), Some(TAU));
        for pair in sectors.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
    }

    proptest! {
        #[test]
        fn test_widths_proportional(weights in proptest::collection::vec(1u32..1000, 1..50)) {
            let entries = active(&weights);
            let sectors = compute_layout(&entries);
            let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
            let sum: f64 = sectors.iter().map(Sector::width).sum();
            prop_assert!((sum - TAU).abs() < 1e-9);
            for (sector, &weight) in sectors.iter().zip(&weights) {
                let expected = TAU * f64::from(weight) / total as f64;
                prop_assert!((sector.width() - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn test_layout_is_idempotent(weights in proptest::collection::vec(1u32..100, 0..30)) {
            let entries = active(&weights);
            prop_assert_eq!(compute_layout(&entries), compute_layout(&entries));
        }
    }
}
