//! Quadratic easing curves, normalised to `[0, 1]`.

pub fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

/// Accelerating curve (`power2.in`).
pub fn power2_in(t: f64) -> f64 {
    let t = clamp_unit(t);
    t * t
}

/// Decelerating curve (`power2.out`).
pub fn power2_out(t: f64) -> f64 {
    let t = clamp_unit(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Linear interpolation that lands exactly on its endpoints.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        from + (to - from) * t
    }
}
