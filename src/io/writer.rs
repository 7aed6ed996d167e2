//! Rank output
//!
//! One `<node_id><TAB><rank>` line per node. Ranks carry 17 significant
//! digits so every double survives a text round trip.

use crate::graph::NodeId;
use std::io::{self, BufWriter, Write};

const SIGNIFICANT_DIGITS: i32 = 17;

/// Format a rank like C's `%.17g`.
///
/// Fixed notation when the decimal exponent X satisfies -4 <= X < 17,
/// scientific otherwise; trailing zeros are dropped in both.
pub fn format_rank(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..SIGNIFICANT_DIGITS).contains(&exponent) {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Write `<id>\t<rank>` lines in the given order.
pub fn write_ranks<'a, W, I>(out: W, ranks: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a NodeId, f64)>,
{
    let mut out = BufWriter::new(out);
    for (id, rank) in ranks {
        writeln!(out, "{}\t{}", id, format_rank(rank))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_percent_17g() {
        assert_eq!(format_rank(0.15), "0.14999999999999999");
        assert_eq!(format_rank(1.0 / 3.0), "0.33333333333333331");
        assert_eq!(format_rank(1.0), "1");
        assert_eq!(format_rank(0.0), "0");
        assert_eq!(format_rank(2.5), "2.5");
        assert_eq!(format_rank(0.0001), "0.0001");
        assert_eq!(format_rank(0.00001), "1.0000000000000001e-05");
        assert_eq!(format_rank(1e17), "1e+17");
        assert_eq!(format_rank(123456.0), "123456");
    }

    #[test]
    fn test_format_round_trips() {
        for value in [0.15_f64, 0.2775, 1.0 / 7.0, 3.0e-9, 12345.678901234567] {
            let parsed: f64 = format_rank(value).parse().unwrap();
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn test_write_ranks() {
        let a = NodeId::from("A");
        let b = NodeId::Integer(2);
        let mut out = Vec::new();
        write_ranks(&mut out, vec![(&a, 0.5), (&b, 1.0)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A\t0.5\n2\t1\n");
    }
}
