// --- File: geometry.rs ---
use glam::Vec2;

// --- Helper Functions ---

/// Displacement from `from` to `to`. With `wrap` set, the nearest periodic
/// image inside a box of `size` is used instead of the raw difference.
#[inline]
pub fn displacement(from: Vec2, to: Vec2, size: Vec2, wrap: bool) -> Vec2 {
    let delta = to - from;
    if wrap { nearest_image(delta, size) } else { delta }
}

/// Subtracts `round(delta / size) * size` on each axis.
#[inline]
pub fn nearest_image(delta: Vec2, size: Vec2) -> Vec2 {
    delta - (delta / size).round() * size
}

/// Contact test on squared distances; `reach` is the centre-to-centre threshold.
#[inline]
pub fn in_contact(delta: Vec2, reach: f32) -> bool {
    delta.length_squared() <= reach * reach
}

/// Reduces a position modulo the box on both axes, always landing in `[0, size)`.
pub fn wrap_position(position: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(position.x, size.x), wrap_axis(position.y, size.y))
}

fn wrap_axis(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid rounds tiny negatives up to exactly `size`
    if wrapped >= size { 0.0 } else { wrapped }
}

#[inline]
pub fn clamp_position(position: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    position.clamp(min, max)
}

/// Unit vector in the direction of `v`, or `fallback` when `v` has no length.
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let length = v.length();
    if length > 0.0 { v / length } else { fallback }
}

/// Rescales `velocity` so its magnitude lies in `[min_speed, max_speed]`,
/// keeping its direction. A zero vector is returned unchanged.
pub fn limit_speed(velocity: Vec2, min_speed: f32, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 {
        return velocity;
    }
    let target = speed.clamp(min_speed, max_speed);
    if target == speed {
        velocity
    } else {
        velocity / speed * target
    }
}


// --- End of File: geometry.rs ---
