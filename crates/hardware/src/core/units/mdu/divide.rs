//! Restoring division.
//!
//! Each iteration shifts the next dividend bit (MSB first) into a 33-bit partial
//! remainder and subtracts the divisor when it fits, producing one quotient bit.

/// Partial remainder and quotient carried between iterations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DivState {
    /// 33-bit partial remainder.
    pub remainder: u64,
    /// Quotient bits produced so far.
    pub quotient: u32,
}

/// Performs division iteration `i` (0 = dividend MSB).
pub const fn step(st: DivState, dividend: u32, divisor: u32, i: u32) -> DivState {
    let bit = 31 - i;
    let rem = (st.remainder << 1) | ((dividend >> bit) & 1) as u64;
    if rem >= divisor as u64 {
        DivState { remainder: rem - divisor as u64, quotient: st.quotient | (1 << bit) }
    } else {
        DivState { remainder: rem, quotient: st.quotient }
    }
}

/// Applies result signs and the division-by-zero rule.
///
/// Division by zero yields an all-ones quotient and returns the original
/// dividend as the remainder, for both signed and unsigned requests.
///
/// # Returns
///
/// `(quotient, remainder)`.
pub const fn finish(
    st: DivState,
    dividend: u32,
    divisor: u32,
    negate_quotient: bool,
    negate_remainder: bool,
) -> (u32, u32) {
    if divisor == 0 {
        return (u32::MAX, dividend);
    }
    let q = if negate_quotient { st.quotient.wrapping_neg() } else { st.quotient };
    let r = st.remainder as u32;
    let r = if negate_remainder { r.wrapping_neg() } else { r };
    (q, r)
}
