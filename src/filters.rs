use crate::errors::{Result, ViewerError};
use serde::{Deserialize, Serialize};

/// Luminance weights for the grayscale filter. The eye is bad at seeing
/// red and blue, so those channels are de-emphasized.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn byte_index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    fn from_index(index: usize) -> Option<Channel> {
        match index {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            _ => None,
        }
    }
}

/// A pure pixel transform over a raw RGBA buffer.
///
/// Filters carry their arguments, so a stored `Filter` is exactly one
/// replayable history entry. Channel deltas are applied without a
/// saturation guard; out-of-range values wrap through the byte store,
/// matching the storage semantics of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Grayscale,
    ChannelOffset { channel: Channel, delta: i16 },
    Brightness { delta: i16 },
}

impl Filter {
    /// Look up a filter by registry name. `args` are positional: `rgb`
    /// takes a channel index (0 = red, 1 = green, 2 = blue) and a delta,
    /// `brightness` a single delta, `grayscale` none.
    pub fn parse(name: &str, args: &[f32]) -> Result<Filter> {
        match name {
            "grayscale" => Ok(Filter::Grayscale),
            "rgb" => {
                // The channel index must be an exact 0/1/2; a negative or
                // fractional value would otherwise saturate through the
                // cast and silently pick the wrong channel.
                let channel = args
                    .first()
                    .filter(|i| i.fract() == 0.0 && **i >= 0.0)
                    .and_then(|&i| Channel::from_index(i as usize))
                    .ok_or_else(|| ViewerError::InvalidFilterArgs {
                        name: name.to_string(),
                    })?;
                let delta = args.get(1).copied().ok_or_else(|| {
                    ViewerError::InvalidFilterArgs {
                        name: name.to_string(),
                    }
                })? as i16;
                Ok(Filter::ChannelOffset { channel, delta })
            }
            "brightness" => {
                let delta = args.first().copied().ok_or_else(|| {
                    ViewerError::InvalidFilterArgs {
                        name: name.to_string(),
                    }
                })? as i16;
                Ok(Filter::Brightness { delta })
            }
            _ => Err(ViewerError::UnknownFilter {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::ChannelOffset { .. } => "rgb",
            Filter::Brightness { .. } => "brightness",
        }
    }

    /// Apply the transform in place. `pixels` is tightly packed RGBA.
    pub fn apply(&self, pixels: &mut [u8]) {
        match *self {
            Filter::Grayscale => {
                for px in pixels.chunks_exact_mut(4) {
                    let v = LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32;
                    let v = v.round() as u8;
                    px[0] = v;
                    px[1] = v;
                    px[2] = v;
                }
            }
            Filter::ChannelOffset { channel, delta } => {
                let idx = channel.byte_index();
                for px in pixels.chunks_exact_mut(4) {
                    px[idx] = (px[idx] as i16 + delta) as u8;
                }
            }
            Filter::Brightness { delta } => {
                for px in pixels.chunks_exact_mut(4) {
                    px[0] = (px[0] as i16 + delta) as u8;
                    px[1] = (px[1] as i16 + delta) as u8;
                    px[2] = (px[2] as i16 + delta) as u8;
                }
            }
        }
    }
}

/// Ordered, append-only record of applied filters, replayed against every
/// freshly painted frame so filter results survive the erase-and-repaint
/// cycle.
#[derive(Debug, Clone, Default)]
pub struct FilterHistory {
    entries: Vec<Filter>,
}

impl FilterHistory {
    pub fn push(&mut self, filter: Filter) {
        self.entries.push(filter);
    }

    pub fn entries(&self) -> &[Filter] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
