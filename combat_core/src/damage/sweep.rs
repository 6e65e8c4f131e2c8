//! Segment vs sphere tests used by sphere sweeps

use sim_core::Vec3;

/// Closest point to `center` on the segment `p0..p1`, with its parameter in `[0, 1]`
pub fn closest_point_on_segment(p0: Vec3, p1: Vec3, center: Vec3) -> (Vec3, f32) {
    let v = p1 - p0;
    let w = center - p0;
    let vv = v.dot(v);
    let t = if vv > 0.0 { (w.dot(v) / vv).clamp(0.0, 1.0) } else { 0.0 };
    (p0 + v * t, t)
}

/// Parameter along `p0..p1` where the segment comes closest to the sphere,
/// or None if it stays outside radius `r`
pub fn segment_hits_sphere(p0: Vec3, p1: Vec3, center: Vec3, r: f32) -> Option<f32> {
    let (closest, t) = closest_point_on_segment(p0, p1, center);
    ((closest - center).length() <= r).then_some(t)
}
