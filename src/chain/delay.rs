use std::time::Duration;

use rand::Rng;

use super::Entry;

/// Computes the pause after one execution of `entry`.
///
/// Returns `None` when both bounds are zero. When `delay_max` exceeds
/// `delay_min` the result is `delay_min` plus a uniform draw from
/// `[0, delay_max - delay_min)`; otherwise it is exactly `delay_min`.
pub fn entry_delay<R>(entry: &Entry, rng: &mut R) -> Option<Duration>
where
    R: Rng + ?Sized,
{
    delay_between(entry.delay_min, entry.delay_max, rng)
}

pub(crate) fn delay_between<R>(min: Duration, max: Duration, rng: &mut R) -> Option<Duration>
where
    R: Rng + ?Sized,
{
    if min.is_zero() && max.is_zero() {
        return None;
    }
    if max <= min {
        return Some(min);
    }

    let span_nanos = u64::try_from(max.saturating_sub(min).as_nanos()).unwrap_or(u64::MAX);
    let extra = Duration::from_nanos(rng.gen_range(0..span_nanos));
    Some(min.saturating_add(extra))
}
