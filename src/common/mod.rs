//! Common functionality.

use byte_unit::Byte;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use indexmap::IndexMap;

pub mod io;

pub use io::{open_read_maybe_gz, open_write_maybe_gz};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Helper to print the current memory resident set size via `tracing`.
pub fn trace_rss_now() {
    let rss = procfs::process::Process::myself()
        .and_then(|me| me.stat())
        .map(|stat| stat.rss * procfs::page_size());
    match rss {
        Ok(rss) => tracing::debug!(
            "RSS now: {}",
            Byte::from_u64(rss).get_appropriate_unit(byte_unit::UnitType::Binary)
        ),
        Err(e) => tracing::debug!("could not determine RSS: {}", e),
    }
}

/// Definition of canonical chromosome names.
pub const CHROMS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "M",
];

/// Build mapping of chromosome names to chromosome counts.
pub fn build_chrom_map() -> IndexMap<String, usize> {
    let mut result = IndexMap::new();
    for (i, &chrom_name) in CHROMS.iter().enumerate() {
        result.insert(chrom_name.to_owned(), i);
        result.insert(format!("chr{chrom_name}").to_owned(), i);
    }
    result.insert("x".to_owned(), 22);
    result.insert("y".to_owned(), 23);
    result.insert("chrx".to_owned(), 22);
    result.insert("chry".to_owned(), 23);
    result.insert("mt".to_owned(), 24);
    result.insert("m".to_owned(), 24);
    result.insert("chrmt".to_owned(), 24);
    result.insert("chrm".to_owned(), 24);
    result.insert("MT".to_owned(), 24);
    result.insert("chrMT".to_owned(), 24);
    result
}

/// Return the canonical rank of a chromosome name, if it is a known one.
pub fn chrom_rank(name: &str) -> Option<usize> {
    static CHROM_MAP: std::sync::OnceLock<IndexMap<String, usize>> = std::sync::OnceLock::new();
    let chrom_map = CHROM_MAP.get_or_init(build_chrom_map);
    chrom_map
        .get(name)
        .or_else(|| chrom_map.get(&name.to_ascii_lowercase()))
        .copied()
}

/// A chromosome name that sorts by canonical rank.
///
/// Known names (`1`..`22`, `X`, `Y`, `MT` and their `chr`-prefixed aliases)
/// come first in karyotype order; unknown names follow in lexicographic order.
/// Equal ranks (e.g., `1` and `chr1`) are ordered by name so the order stays
/// total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Chromosome(String);

impl Chromosome {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn sort_key(&self) -> (usize, &str) {
        (chrom_rank(&self.0).unwrap_or(usize::MAX), &self.0)
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Chromosome {
    fn from(val: &str) -> Self {
        Self::new(val)
    }
}

impl From<String> for Chromosome {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl PartialOrd for Chromosome {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Chromosome {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Round `value` to `digits` decimal places.
///
/// Goes through the decimal representation so that values such as `0.0565`
/// round the same way as their printed form suggests.
pub fn round_to(value: f64, digits: usize) -> f64 {
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}

/// Print a float in shortest round-trip form, keeping `.0` on integral values.
///
/// Never uses exponent notation, e.g., `3e-5` is printed as `0.00003`.
pub fn display_float(value: f64) -> String {
    let shortest = format!("{:?}", value);
    if !value.is_finite() || !shortest.contains('e') {
        return shortest;
    }
    let plain = format!("{}", value);
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// Format `value` in scientific notation with `digits` fractional digits and a
/// signed exponent of at least two digits, e.g., `1.23e-07`.
pub fn format_scientific(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*e}", digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!(
                "{}e{}{:02}",
                mantissa,
                if exponent < 0 { '-' } else { '+' },
                exponent.abs()
            ),
            Err(_) => formatted,
        },
        // `inf` and `NaN` have no exponent.
        None => formatted,
    }
}

/// Convert `s` to title case.
///
/// Every letter following a non-letter is upper-cased, all other letters are
/// lower-cased.
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            result.push(c);
            prev_cased = false;
        }
    }
    result
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Chromosome;

    #[test]
    fn trace_rss_now_smoke() {
        super::trace_rss_now();
    }

    #[rstest::rstest]
    #[case("1", Some(0))]
    #[case("chr22", Some(21))]
    #[case("X", Some(22))]
    #[case("chrx", Some(22))]
    #[case("chrY", Some(23))]
    #[case("MT", Some(24))]
    #[case("Mt", Some(24))]
    #[case("GL000192.1", None)]
    fn chrom_rank(#[case] name: &str, #[case] expected: Option<usize>) {
        assert_eq!(expected, super::chrom_rank(name));
    }

    #[test]
    fn chromosome_sorts_by_karyotype() {
        let mut chroms = ["X", "10", "2", "unplaced", "1", "MT", "22"]
            .into_iter()
            .map(Chromosome::from)
            .collect::<Vec<_>>();
        chroms.sort();

        let names = chroms.iter().map(|c| c.name()).collect::<Vec<_>>();
        assert_eq!(vec!["1", "2", "10", "22", "X", "MT", "unplaced"], names);
    }

    #[rstest::rstest]
    #[case(1.234, 2, 1.23)]
    #[case(0.0567, 3, 0.057)]
    #[case(0.123456789, 5, 0.12346)]
    #[case(-0.004, 2, -0.0)]
    fn round_to(#[case] value: f64, #[case] digits: usize, #[case] expected: f64) {
        let actual = super::round_to(value, digits);
        assert!(
            float_cmp::approx_eq!(f64, expected, actual, ulps = 2),
            "{} != {}",
            expected,
            actual
        );
    }

    #[rstest::rstest]
    #[case(2.0, "2.0")]
    #[case(1.23, "1.23")]
    #[case(0.057, "0.057")]
    #[case(-0.5, "-0.5")]
    #[case(0.00003, "0.00003")]
    #[case(0.000031, "0.000031")]
    #[case(-1.5e-7, "-0.00000015")]
    #[case(1e20, "100000000000000000000.0")]
    fn display_float(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(expected, super::display_float(value));
    }

    #[rstest::rstest]
    #[case(1e-7, "1.00e-07")]
    #[case(1.234e-12, "1.23e-12")]
    #[case(3.2e-105, "3.20e-105")]
    #[case(1.0, "1.00e+00")]
    #[case(12346.0, "1.23e+04")]
    fn format_scientific(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(expected, super::format_scientific(value, 2));
    }

    #[rstest::rstest]
    #[case("missense variant", "Missense Variant")]
    #[case("MODERATE", "Moderate")]
    #[case("5 prime UTR variant", "5 Prime Utr Variant")]
    #[case("diseases of the circulatory system", "Diseases Of The Circulatory System")]
    #[case("", "")]
    fn title_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(expected, super::title_case(input));
    }
}
