//! TSV Serializing helpers, functionality, etc.

use crate::traits::TsvSerialize;
use lazy_static::lazy_static;

lazy_static! {
    /// The standard popmunge TSV configuration: floats in shortest round-trip
    /// form, with integral values keeping a trailing `.0`.
    pub static ref POPMUNGE_TSV: TsvConfig = TsvConfig { precision: None };
}

/// This is an extensible type to handle common
/// TSV output configurations, e.g. how many decimals to write floats with.
#[derive(Clone, Debug)]
pub struct TsvConfig {
    pub precision: Option<usize>,
}

impl TsvConfig {
    /// Build a configuration that writes floats with a fixed number of decimals.
    pub fn with_precision(precision: Option<usize>) -> Self {
        Self { precision }
    }
}

/// Format a float for TSV output.
///
/// Without a set precision this matches the tables written by dataframe
/// libraries: `3.0`, `30.0`, `0.1`, `0.30000000000000004`.
pub fn format_float(value: f64, config: &TsvConfig) -> String {
    if let Some(precision) = config.precision {
        return format!("{:.*}", precision, value);
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl TsvSerialize for f64 {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        format_float(*self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_default() {
        assert_eq!(format_float(3.0, &POPMUNGE_TSV), "3.0");
        assert_eq!(format_float(30.0, &POPMUNGE_TSV), "30.0");
        assert_eq!(format_float(0.1, &POPMUNGE_TSV), "0.1");
        assert_eq!(format_float(0.0, &POPMUNGE_TSV), "0.0");
        assert_eq!(format_float(0.1 + 0.2, &POPMUNGE_TSV), "0.30000000000000004");
    }

    #[test]
    fn test_format_float_precision() {
        let config = TsvConfig::with_precision(Some(3));
        assert_eq!(format_float(0.1, &config), "0.100");
        assert_eq!(format_float(2.0, &config), "2.000");
    }

    #[test]
    fn test_f64_to_tsv() {
        assert_eq!(1.5_f64.to_tsv(&POPMUNGE_TSV), "1.5");
        assert_eq!(2.0_f64.to_tsv(&TsvConfig::with_precision(Some(1))), "2.0");
    }
}
