/*
 * Heading Module
 *
 * Angle helpers shared by the steering code. All headings are in degrees,
 * measured from the +x axis toward +y of the simulation plane.
 */

use nannou::prelude::*;

pub const FULL_TURN: f32 = 360.0;
const HALF_TURN: f32 = 180.0;

/// Wrap an angle into `[0, 360)`. NaN collapses to 0.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = ((angle % FULL_TURN) + FULL_TURN) % FULL_TURN;
    // f32 rounding can land exactly on 360 for tiny negative inputs
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed turn from `current` to `target`, in `(-180, 180]`.
#[inline]
pub fn signed_angle_diff(target: f32, current: f32) -> f32 {
    let diff = normalize_angle(target - current);
    if diff > HALF_TURN {
        diff - FULL_TURN
    } else {
        diff
    }
}

/// Circular mean of a set of headings.
///
/// Averages unit vectors rather than raw degrees so that {350, 10} yields 0,
/// not 180. An empty or perfectly balanced set returns 0.
pub fn average_heading<I>(headings: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    let (sum_sin, sum_cos) = headings
        .into_iter()
        .fold((0.0_f32, 0.0_f32), |(s, c), h| {
            let rad = h.to_radians();
            (s + rad.sin(), c + rad.cos())
        });
    normalize_angle(sum_sin.atan2(sum_cos).to_degrees())
}

/// Angle of a vector in degrees, as returned by `atan2`.
#[inline]
pub fn polar_angle(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Unit direction for a heading.
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    let rad = heading.to_radians();
    vec2(rad.cos(), rad.sin())
}
