//! Keyframed response curves.
//!
//! A [`ResponseCurve`] remaps a scalar input through a sequence of keyframes
//! using cubic Hermite interpolation. Inputs outside the keyed range clamp to
//! the first or last key, so evaluation never fails.

use serde::{Deserialize, Serialize};

/// A single control point of a [`ResponseCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Input position of the key.
    pub time: f32,
    /// Output value at `time`.
    pub value: f32,
    /// Slope arriving at this key from the left.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key to the right.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// A key with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    /// A key with explicit incoming and outgoing slopes.
    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Piecewise cubic Hermite curve over sorted keyframes.
///
/// Serializes as a plain list of keyframes:
///
/// ```text
/// [(time: 0.0, value: 0.0, in_tangent: 1.0, out_tangent: 1.0),
///  (time: 1.0, value: 1.0, in_tangent: 1.0, out_tangent: 1.0)]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct ResponseCurve {
    keys: Vec<Keyframe>,
}

impl ResponseCurve {
    /// Build a curve from keys in any order. Keys are sorted by `time`.
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`, clamped outside that span.
    ///
    /// Both tangents are set to the segment slope, which makes the Hermite
    /// segment degenerate to linear interpolation.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let slope = if t1 != t0 { (v1 - v0) / (t1 - t0) } else { 0.0 };
        Self::new(vec![
            Keyframe::with_tangents(t0, v0, slope, slope),
            Keyframe::with_tangents(t1, v1, slope, slope),
        ])
    }

    /// The identity mapping on `[0, 1]`.
    pub fn identity() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }

    /// A curve that returns `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)])
    }

    /// Sorted keyframes.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluate the curve at `t`.
    ///
    /// An empty curve evaluates to `0.0`. `NaN` evaluates to the first key.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // first.time < t < last.time, so 1 <= upper <= len - 1.
        let upper = self.keys.partition_point(|k| k.time <= t);
        hermite(&self.keys[upper - 1], &self.keys[upper], t)
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Vec<Keyframe>> for ResponseCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl From<ResponseCurve> for Vec<Keyframe> {
    fn from(curve: ResponseCurve) -> Self {
        curve.keys
    }
}

fn hermite(a: &Keyframe, b: &Keyframe, t: f32) -> f32 {
    let dt = b.time - a.time;
    let s = (t - a.time) / dt;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * a.value + h10 * dt * a.out_tangent + h01 * b.value + h11 * dt * b.in_tangent
}
