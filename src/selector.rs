//! Filtering and weighted random selection.
//!
//! All functions are pure over the slice they are given; the stored
//! collection is never touched here.

use rand::Rng;

use crate::option::WheelOption;
use crate::store::total_weight;

/// Keep options that fit within `ceiling` minutes. Options without a
/// duration always fit. No ceiling keeps everything.
pub fn filter_by_duration(options: &[WheelOption], ceiling: Option<u16>) -> Vec<WheelOption> {
    match ceiling {
        None => options.to_vec(),
        Some(ceiling) => options
            .iter()
            .filter(|o| o.fits_within(ceiling))
            .cloned()
            .collect(),
    }
}

/// Keep options carrying every tag in `required` (case-insensitive).
/// An empty requirement keeps everything.
pub fn filter_by_tags<T: AsRef<str>>(options: &[WheelOption], required: &[T]) -> Vec<WheelOption> {
    if required.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|o| o.has_all_tags(required))
        .cloned()
        .collect()
}

/// Filter, then draw one option with probability proportional to its weight.
pub fn select_random<T: AsRef<str>>(
    options: &[WheelOption],
    ceiling: Option<u16>,
    tags: &[T],
) -> Option<WheelOption> {
    select_random_with(options, ceiling, tags, &mut rand::thread_rng())
}

/// [`select_random`] with a caller-supplied random source.
pub fn select_random_with<T, R>(
    options: &[WheelOption],
    ceiling: Option<u16>,
    tags: &[T],
    rng: &mut R,
) -> Option<WheelOption>
where
    T: AsRef<str>,
    R: Rng + ?Sized,
{
    let eligible = filter_by_tags(&filter_by_duration(options, ceiling), tags);
    pick_weighted(&eligible, rng).cloned()
}

/// Weighted draw over `options` in sequence order.
///
/// One uniform sample in `[0, total)` is walked down the sequence; the first
/// option that brings the remainder to `<= 0` wins. If float drift exhausts
/// the walk, the last option is returned.
pub fn pick_weighted<'a, R: Rng + ?Sized>(
    options: &'a [WheelOption],
    rng: &mut R,
) -> Option<&'a WheelOption> {
    let last = options.last()?;
    let total = f64::from(total_weight(options));
    let mut remainder = rng.gen::<f64>() * total;

    for option in options {
        remainder -= f64::from(option.weight);
        if remainder <= 0.0 {
            return Some(option);
        }
    }
    Some(last)
}
