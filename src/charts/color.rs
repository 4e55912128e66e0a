//! Colours shared by the interactive and static renderers.

use serde::Serialize;

/// Plain 8-bit RGB colour, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const PLOTLY_BLUE: Rgb = Rgb(99, 110, 250); // #636efa
    pub const PLOTLY_RED: Rgb = Rgb(239, 85, 59); // #EF553B
    pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
    pub const LIGHT_GREEN: Rgb = Rgb(144, 238, 144);

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Red-to-blue diverging scale stops, low values first.
const RDBU: [Rgb; 11] = [
    Rgb(103, 0, 31),
    Rgb(178, 24, 43),
    Rgb(214, 96, 77),
    Rgb(244, 165, 130),
    Rgb(253, 219, 199),
    Rgb(247, 247, 247),
    Rgb(209, 229, 240),
    Rgb(146, 197, 222),
    Rgb(67, 147, 195),
    Rgb(33, 102, 172),
    Rgb(5, 48, 97),
];

/// Continuous colour scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Diverging red (low) to blue (high).
    RdBu,
}

impl ColorScale {
    fn stops(&self) -> &'static [Rgb] {
        match self {
            ColorScale::RdBu => &RDBU,
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range input is clamped.
    pub fn at(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        if lower >= stops.len() - 1 {
            return stops[stops.len() - 1];
        }
        stops[lower].lerp(stops[lower + 1], scaled - lower as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rdbu_endpoints_and_midpoint() {
        assert_eq!(ColorScale::RdBu.at(0.0), Rgb(103, 0, 31));
        assert_eq!(ColorScale::RdBu.at(1.0), Rgb(5, 48, 97));
        assert_eq!(ColorScale::RdBu.at(0.5), Rgb(247, 247, 247));
        assert_eq!(ColorScale::RdBu.at(-3.0), ColorScale::RdBu.at(0.0));
    }

    #[test]
    fn rdbu_interpolates_between_stops() {
        let c = ColorScale::RdBu.at(0.05);
        assert_eq!(c, Rgb(141, 12, 37));
    }
}
