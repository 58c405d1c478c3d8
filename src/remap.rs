use std::fmt;

/// Note range of the physical pad.
pub const PAD_NOTE_MIN: f64 = 36.0;
pub const PAD_NOTE_MAX: f64 = 43.0;
pub const BUTTON_MIN: f64 = 1.0;
pub const BUTTON_MAX: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub enum RemapError {
    ZeroWidthRange(f64),
}

impl fmt::Display for RemapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemapError::ZeroWidthRange(v) => {
                write!(f, "calibration input range is empty ({} to {})", v, v)
            }
        }
    }
}

impl std::error::Error for RemapError {}

/// Linear interpolation of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
/// Values outside the input range extrapolate.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
}

impl Calibration {
    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<Self, RemapError> {
        if in_min == in_max {
            return Err(RemapError::ZeroWidthRange(in_min));
        }
        Ok(Self {
            in_min,
            in_max,
            out_min,
            out_max,
        })
    }

    pub fn remap(&self, value: f64) -> f64 {
        remap(value, self.in_min, self.in_max, self.out_min, self.out_max)
    }

    /// Button index for a note. Truncates toward zero and does not clamp, so notes
    /// outside the pad range give indices outside the button range.
    pub fn button_for(&self, note: u8) -> i32 {
        self.remap(f64::from(note)) as i32
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            in_min: PAD_NOTE_MIN,
            in_max: PAD_NOTE_MAX,
            out_min: BUTTON_MIN,
            out_max: BUTTON_MAX,
        }
    }
}
