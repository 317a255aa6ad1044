use rand::Rng;

use crate::active::{total_weight, ActiveEntry};
use crate::error::{WheelError, WheelResult};

/// Wraps any `rand` generator as the `[0, 1)` source the draw expects.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> impl FnMut() -> f64 + '_ {
    move || rng.gen::<f64>()
}

/// Picks one active entry with probability `weight / total_weight`.
///
/// Entries are walked in the same order the layout uses, so the winner is the
/// entry whose sector spans the drawn cumulative position.
pub fn draw_winner<F>(active: &[ActiveEntry], rng: F) -> WheelResult<&ActiveEntry>
where
    F: FnMut() -> f64,
{
    let index = draw_index(active, rng)?;
    Ok(&active[index])
}

pub(crate) fn draw_index<F>(active: &[ActiveEntry], mut rng: F) -> WheelResult<usize>
where
    F: FnMut() -> f64,
{
    let total = total_weight(active);
    if total == 0 {
        return Err(WheelError::EmptySelection);
    }

    let sample = rng();
    let unit = if sample.is_finite() {
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    };

    let mut remainder = unit * total as f64;
    // zero-weight entries own no sector, so they can never win
    for (index, entry) in active.iter().enumerate().filter(|(_, e)| e.weight > 0) {
        remainder -= f64::from(entry.weight);
        if remainder <= 0.0 {
            return Ok(index);
        }
    }
    active
        .iter()
        .rposition(|e| e.weight > 0)
        .ok_or(WheelError::EmptySelection)
}
