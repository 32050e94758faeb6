//! Frame-rate independent easing shared by the viewpoint and the artwork highlight.

/// Fraction of the remaining distance covered in `dt` seconds at `rate` per second.
///
/// Splitting a step in two gives the same result as taking it whole, so motion
/// looks the same at any refresh rate.
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

pub fn smooth_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * smoothing_factor(rate, dt)
}

/// Clamp to `[-limit, limit]`. Unlike `f32::clamp` this never panics, and a NaN
/// value lands on `-limit`.
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    value.max(-limit).min(limit)
}
