use glam::Vec2;

/// Linear falloff: 1 at the center, 0 at `radius` and beyond.
pub fn proximity(dist: f32, radius: f32) -> f32 {
    if radius <= 0.0 || dist >= radius {
        0.0
    } else {
        1.0 - dist / radius
    }
}

pub fn pointer_proximity(pointer: Option<Vec2>, p: Vec2, radius: f32) -> f32 {
    pointer
        .map(|m| proximity(m.distance(p), radius))
        .unwrap_or(0.0)
}

/// Exponential smoothing step toward `target`.
pub fn smooth_toward(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_is_linear_and_zero_outside() {
        assert_eq!(proximity(0.0, 70.0), 1.0);
        assert!((proximity(35.0, 70.0) - 0.5).abs() < 1e-6);
        assert_eq!(proximity(70.0, 70.0), 0.0);
        assert_eq!(proximity(500.0, 70.0), 0.0);
        assert_eq!(proximity(1.0, 0.0), 0.0);
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut v = 0.0;
        for _ in 0..200 {
            let next = smooth_toward(v, 1.0, 0.08);
            assert!(next >= v && next <= 1.0);
            v = next;
        }
        assert!(v > 0.99);
    }

    #[test]
    fn absent_pointer_has_no_influence() {
        assert_eq!(pointer_proximity(None, Vec2::ZERO, 100.0), 0.0);
        assert_eq!(pointer_proximity(Some(Vec2::ZERO), Vec2::ZERO, 100.0), 1.0);
    }
}
