//! Strategy engine: decides which characters of a value stay visible
//!
//! All counting is in Unicode scalar values, not bytes, so multi-byte
//! characters mask cleanly.

use crate::options::Strategy;

/// Counts of characters kept at the front and back of a value.
fn kept(len: usize, strategy: &Strategy) -> (usize, usize) {
    match strategy {
        Strategy::Full => (0, 0),
        Strategy::Middle => {
            if len <= 2 {
                (0, 0)
            } else {
                (1, 1)
            }
        }
        Strategy::First(n) => ((*n).min(len), 0),
        Strategy::Last(n) => (0, (*n).min(len)),
        Strategy::Partial(ratio) => {
            let keep = ((len as f64) * ratio).floor() as usize;
            (keep.min(len), 0)
        }
    }
}

/// Apply a visibility strategy to `value`, replacing hidden characters
/// with `mask_char`.
pub fn apply_strategy(value: &str, strategy: &Strategy, mask_char: char) -> String {
    let len = value.chars().count();
    let (front, back) = kept(len, strategy);

    if front + back >= len {
        return value.to_string();
    }

    value
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < front || i >= len - back {
                c
            } else {
                mask_char
            }
        })
        .collect()
}

/// Number of characters of `value` the strategy leaves readable.
pub fn visible_count(value: &str, strategy: &Strategy) -> usize {
    let len = value.chars().count();
    let (front, back) = kept(len, strategy);
    (front + back).min(len)
}

/// Number of characters of `value` the strategy hides.
///
/// For every value and strategy, `visible_count + masked_count` equals the
/// character length of the value.
pub fn masked_count(value: &str, strategy: &Strategy) -> usize {
    value.chars().count() - visible_count(value, strategy)
}
