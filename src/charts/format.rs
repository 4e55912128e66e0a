//! Value label formatting (SI prefixes, percentages, thousands separators).

use serde::Serialize;

/// How a bar's value label is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueFormat {
    /// Significant digits with an SI suffix, e.g. `840k`, `2.3M`.
    SiPrefix { significant: usize },
    /// Fraction shown as a percentage, e.g. `-5.00%`.
    Percent { decimals: usize },
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match *self {
            ValueFormat::SiPrefix { significant } => format_si(value, significant),
            ValueFormat::Percent { decimals } => format_percent(value, decimals),
        }
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Round to `significant` digits and attach the SI prefix of the result.
pub fn format_si(value: f64, significant: usize) -> String {
    let significant = significant.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", significant - 1, if value.is_finite() { 0.0 } else { value });
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let rounded = round_significant(value.abs(), significant);
    let exponent = rounded.log10().floor() as i32;
    let prefix_index = exponent.div_euclid(3).clamp(-8, 8);
    let scaled = rounded / 10f64.powi(prefix_index * 3);
    let integer_digits = exponent - prefix_index * 3 + 1;
    let decimals = (significant as i32 - integer_digits).max(0) as usize;

    format!(
        "{sign}{scaled:.decimals$}{}",
        SI_PREFIXES[(prefix_index + 8) as usize]
    )
}

fn round_significant(value: f64, significant: usize) -> f64 {
    let exponent = value.log10().floor() as i32;
    let magnitude = 10f64.powi(exponent - significant as i32 + 1);
    (value / magnitude).round() * magnitude
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Integer with `,` thousands separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount, e.g. `$2,297,201` or `-$3,400`.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_thousands(value.abs().round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn si_two_significant_digits() {
        assert_eq!(format_si(836_154.03, 2), "840k");
        assert_eq!(format_si(741_999.8, 2), "740k");
        assert_eq!(format_si(719_047.03, 2), "720k");
        assert_eq!(format_si(2_297_201.0, 2), "2.3M");
        assert_eq!(format_si(5.0, 2), "5.0");
        assert_eq!(format_si(12.0, 2), "12");
        assert_eq!(format_si(-3_460.0, 2), "-3.5k");
        assert_eq!(format_si(0.5, 2), "500m");
        assert_eq!(format_si(0.0, 2), "0.0");
    }

    #[test]
    fn si_rounding_can_carry_into_next_prefix() {
        assert_eq!(format_si(999_600.0, 2), "1.0M");
    }

    #[test]
    fn percent_labels() {
        assert_eq!(format_percent(-0.05, 2), "-5.00%");
        assert_eq!(format_percent(0.3795, 2), "37.95%");
        assert_eq!(
            ValueFormat::Percent { decimals: 1 }.format(0.25),
            "25.0%"
        );
    }

    #[test]
    fn thousands_and_dollars() {
        assert_eq!(format_thousands(9_994), "9,994");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
        assert_eq!(format_usd(2_297_200.86), "$2,297,201");
        assert_eq!(format_usd(-3_400.2), "-$3,400");
    }
}
