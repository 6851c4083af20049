use crate::errors::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Interpolation curves for animated transitions.
///
/// Every curve maps `(t, b, c, d)` (elapsed, start value, change in value,
/// duration) to an interpolated value, and satisfies `apply(0.0, b, c, d) == b`
/// and `apply(d, b, c, d) == b + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
}

impl Default for Easing {
    fn default() -> Self {
        Easing::OutCubic
    }
}

impl Easing {
    pub const ALL: [Easing; 22] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
    ];

    /// Look up a curve by its registry name.
    pub fn from_name(name: &str) -> Result<Easing> {
        let easing = match name {
            "linear" => Easing::Linear,
            "in_quad" => Easing::InQuad,
            "out_quad" => Easing::OutQuad,
            "in_out_quad" => Easing::InOutQuad,
            "in_cubic" => Easing::InCubic,
            "out_cubic" => Easing::OutCubic,
            "in_out_cubic" => Easing::InOutCubic,
            "in_quart" => Easing::InQuart,
            "out_quart" => Easing::OutQuart,
            "in_out_quart" => Easing::InOutQuart,
            "in_quint" => Easing::InQuint,
            "out_quint" => Easing::OutQuint,
            "in_out_quint" => Easing::InOutQuint,
            "in_sine" => Easing::InSine,
            "out_sine" => Easing::OutSine,
            "in_out_sine" => Easing::InOutSine,
            "in_expo" => Easing::InExpo,
            "out_expo" => Easing::OutExpo,
            "in_out_expo" => Easing::InOutExpo,
            "in_circ" => Easing::InCirc,
            "out_circ" => Easing::OutCirc,
            "in_out_circ" => Easing::InOutCirc,
            _ => {
                return Err(ViewerError::UnknownEasing {
                    name: name.to_string(),
                })
            }
        };
        Ok(easing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InQuad => "in_quad",
            Easing::OutQuad => "out_quad",
            Easing::InOutQuad => "in_out_quad",
            Easing::InCubic => "in_cubic",
            Easing::OutCubic => "out_cubic",
            Easing::InOutCubic => "in_out_cubic",
            Easing::InQuart => "in_quart",
            Easing::OutQuart => "out_quart",
            Easing::InOutQuart => "in_out_quart",
            Easing::InQuint => "in_quint",
            Easing::OutQuint => "out_quint",
            Easing::InOutQuint => "in_out_quint",
            Easing::InSine => "in_sine",
            Easing::OutSine => "out_sine",
            Easing::InOutSine => "in_out_sine",
            Easing::InExpo => "in_expo",
            Easing::OutExpo => "out_expo",
            Easing::InOutExpo => "in_out_expo",
            Easing::InCirc => "in_circ",
            Easing::OutCirc => "out_circ",
            Easing::InOutCirc => "in_out_circ",
        }
    }

    /// Evaluate the curve at elapsed `t` of total duration `d`, starting
    /// from `b` and changing by `c` overall.
    pub fn apply(&self, t: f32, b: f32, c: f32, d: f32) -> f32 {
        match self {
            Easing::Linear => c * t / d + b,
            Easing::InQuad => {
                let t = t / d;
                c * t * t + b
            }
            Easing::OutQuad => {
                let t = t / d;
                -c * t * (t - 2.0) + b
            }
            Easing::InOutQuad => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t + b
                } else {
                    let t = t - 1.0;
                    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
                }
            }
            Easing::InCubic => {
                let t = t / d;
                c * t * t * t + b
            }
            Easing::OutCubic => {
                let t = t / d - 1.0;
                c * (t * t * t + 1.0) + b
            }
            Easing::InOutCubic => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t * t * t + 2.0) + b
                }
            }
            Easing::InQuart => {
                let t = t / d;
                c * t * t * t * t + b
            }
            Easing::OutQuart => {
                let t = t / d - 1.0;
                -c * (t * t * t * t - 1.0) + b
            }
            Easing::InOutQuart => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t * t + b
                } else {
                    let t = t - 2.0;
                    -c / 2.0 * (t * t * t * t - 2.0) + b
                }
            }
            Easing::InQuint => {
                let t = t / d;
                c * t * t * t * t * t + b
            }
            Easing::OutQuint => {
                let t = t / d - 1.0;
                c * (t * t * t * t * t + 1.0) + b
            }
            Easing::InOutQuint => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t * t * t + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t * t * t * t * t + 2.0) + b
                }
            }
            Easing::InSine => -c * (t / d * (PI / 2.0)).cos() + c + b,
            Easing::OutSine => c * (t / d * (PI / 2.0)).sin() + b,
            Easing::InOutSine => -c / 2.0 * ((PI * t / d).cos() - 1.0) + b,
            // The expo curves need endpoint guards to hit the boundary
            // contract exactly: 2^-10 is close to zero but not zero.
            Easing::InExpo => {
                if t == 0.0 {
                    b
                } else {
                    c * 2.0_f32.powf(10.0 * (t / d - 1.0)) + b
                }
            }
            Easing::OutExpo => {
                if t >= d {
                    b + c
                } else {
                    c * (-(2.0_f32.powf(-10.0 * t / d)) + 1.0) + b
                }
            }
            Easing::InOutExpo => {
                if t == 0.0 {
                    return b;
                }
                if t >= d {
                    return b + c;
                }
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * 2.0_f32.powf(10.0 * (t - 1.0)) + b
                } else {
                    let t = t - 1.0;
                    c / 2.0 * (-(2.0_f32.powf(-10.0 * t)) + 2.0) + b
                }
            }
            Easing::InCirc => {
                let t = t / d;
                -c * ((1.0 - t * t).sqrt() - 1.0) + b
            }
            Easing::OutCirc => {
                let t = t / d - 1.0;
                c * (1.0 - t * t).sqrt() + b
            }
            Easing::InOutCirc => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
                }
            }
        }
    }
}
