//! Shift-and-add multiplication.
//!
//! One partial product per cycle: iteration `i` adds `mag_a << i` to the
//! accumulator when bit `i` of `mag_b` is set.

/// Performs multiplication iteration `i` and returns the new accumulator.
pub const fn step(acc: u64, mag_a: u32, mag_b: u32, i: u32) -> u64 {
    if (mag_b >> i) & 1 == 1 {
        acc.wrapping_add((mag_a as u64) << i)
    } else {
        acc
    }
}

/// Applies the recorded sign to the accumulated magnitude product.
pub const fn finish(acc: u64, negate: bool) -> u64 {
    if negate { acc.wrapping_neg() } else { acc }
}
