use glam::Vec2;

/// Point at arc-length fraction `t` along a polyline.
///
/// Zero-length and single-point paths return the first point, `t` beyond
/// the end returns the last point. An empty path yields the origin.
pub fn point_on_path(path: &[Vec2], t: f32) -> Vec2 {
    let Some(&first) = path.first() else {
        return Vec2::ZERO;
    };
    if path.len() < 2 {
        return first;
    }

    let total: f32 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total == 0.0 {
        return first;
    }

    let target = t * total;
    let mut acc = 0.0;
    for w in path.windows(2) {
        let len = w[0].distance(w[1]);
        if acc + len >= target {
            if len == 0.0 {
                return w[0];
            }
            let local = (target - acc) / len;
            return w[0] + (w[1] - w[0]) * local;
        }
        acc += len;
    }

    path[path.len() - 1]
}
