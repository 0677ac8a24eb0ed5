// Math utilities and helper functions

/// Move `value` toward `target` by at most `max_delta`, never overshooting
pub fn move_toward(value: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - value;
    if diff.abs() <= max_delta {
        target
    } else {
        value + diff.signum() * max_delta
    }
}

/// Collapse values within `epsilon` of zero to exactly zero
pub fn snap_to_zero(value: f32, epsilon: f32) -> f32 {
    if value.abs() < epsilon {
        0.0
    } else {
        value
    }
}
