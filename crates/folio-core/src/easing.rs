//! Easing and interpolation helpers used by every animated transition.

use num_traits::Float;

/// Cubic ease-in-out.
///
/// `4p³` on the first half, `1 - (-2p + 2)³ / 2` on the second. The curve is
/// monotonic, passes through `(0, 0)`, `(0.5, 0.5)` and `(1, 1)` and has a
/// continuous first derivative at the midpoint. Progress outside `[0, 1]` is
/// clamped.
#[inline]
pub fn ease_in_out_cubic<T: Float>(progress: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = one + one;
    let half = one / two;
    let four = two + two;

    let p = progress.max(zero).min(one);
    if p < half {
        four * p * p * p
    } else {
        let tail = -two * p + two;
        one - tail * tail * tail / two
    }
}

/// Linear interpolation `a + (b - a) * factor`.
///
/// The factor is not clamped; pass a value in `[0, 1]` for a result between
/// `a` and `b`.
#[inline]
pub fn lerp<T: Float>(a: T, b: T, factor: T) -> T {
    a + (b - a) * factor
}
