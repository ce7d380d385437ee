use std::fmt;

pub const SCALE_MIN: f64 = -12.0;
pub const SCALE_MAX: f64 = 12.0;

/// Evenly spaced over [SCALE_MIN, SCALE_MAX], west to east.
const STOPS: [Rgb; 5] = [
    Rgb(0x31, 0x36, 0x95),
    Rgb(0x45, 0x75, 0xb4),
    Rgb(0xfe, 0xe0, 0x90),
    Rgb(0xf4, 0x6d, 0x43),
    Rgb(0xa5, 0x00, 0x26),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Continuous colour for an offset; values outside the scale take the colour of the nearest end.
pub fn color_for_offset(offset_hours: f64) -> Rgb {
    let clamped = offset_hours.clamp(SCALE_MIN, SCALE_MAX);
    let position = (clamped - SCALE_MIN) / (SCALE_MAX - SCALE_MIN) * (STOPS.len() - 1) as f64;

    let idx = (position.floor() as usize).min(STOPS.len() - 2);
    let t = position - idx as f64;
    let (from, to) = (STOPS[idx], STOPS[idx + 1]);

    Rgb(lerp(from.0, to.0, t), lerp(from.1, to.1, t), lerp(from.2, to.2, t))
}

/// CSS gradient matching the scale, for the legend bar.
pub fn css_gradient() -> String {
    let stops = STOPS.iter()
        .map(Rgb::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!("linear-gradient(to right, {})", stops)
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
}
