#![forbid(unsafe_code)]

//! Easing functions: map phase progress `t` in [0, 1] to shaped output in
//! [0, 1]. Used by the playback scheduler to shape per-phase interpolation
//! before it reaches the render adapter.

/// Easing function signature.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for f in [linear, ease_in, ease_out, ease_in_out] {
            assert!((f(0.0) - 0.0).abs() < f32::EPSILON);
            assert!((f(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        for f in [linear, ease_in, ease_out, ease_in_out] {
            assert!((0.0..=1.0).contains(&f(-3.0)));
            assert!((0.0..=1.0).contains(&f(7.0)));
        }
    }
}
