//! Working with data: histograms, correlation matrices and typed
//! stock-price records parsed from raw string rows.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, Result};
use crate::math::matrix::{make_matrix, Matrix};
use crate::stats::correlation;

/// Rounds `point` down to the nearest multiple of `bucket_size`.
pub fn bucketize(point: f64, bucket_size: f64) -> f64 {
    bucket_size * (point / bucket_size).floor()
}

/// Index of the bucket holding `point`, or `None` when it cannot be
/// represented as an `i64` (non-finite points, or quotients beyond ±2^63).
fn bucket_index(point: f64, bucket_size: f64) -> Option<i64> {
    let idx = (point / bucket_size).floor();
    // i64::MIN as f64 is exactly -2^63; i64::MAX as f64 rounds up to 2^63.
    if idx.is_finite() && idx >= i64::MIN as f64 && idx < i64::MAX as f64 {
        Some(idx as i64)
    } else {
        None
    }
}

/// Counts of points per bucket, keyed by bucket lower bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bucket_size: f64,
    counts: BTreeMap<i64, usize>,
}

impl Histogram {
    pub fn bucket_size(&self) -> f64 {
        self.bucket_size
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count in the bucket containing `point`. Points that no histogram
    /// could hold count as 0.
    pub fn count(&self, point: f64) -> usize {
        bucket_index(point, self.bucket_size)
            .and_then(|idx| self.counts.get(&idx).copied())
            .unwrap_or(0)
    }

    /// `(lower bound, count)` in ascending order of bound.
    pub fn iter(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.counts
            .iter()
            .map(move |(&idx, &count)| (idx as f64 * self.bucket_size, count))
    }
}

pub fn make_histogram(points: &[f64], bucket_size: f64) -> Result<Histogram> {
    if !(bucket_size > 0.0) || !bucket_size.is_finite() {
        return Err(MathError::invalid(format!(
            "bucket_size must be positive, got {}",
            bucket_size
        )));
    }
    let mut counts = BTreeMap::new();
    for &point in points {
        let idx = bucket_index(point, bucket_size).ok_or_else(|| {
            MathError::invalid(format!(
                "point {} has no bucket of size {}",
                point, bucket_size
            ))
        })?;
        *counts.entry(idx).or_insert(0) += 1;
    }
    Ok(Histogram {
        bucket_size,
        counts,
    })
}

/// `len(data) x len(data)` matrix whose `(i, j)` entry is the correlation of
/// `data[i]` with `data[j]`.
pub fn correlation_matrix<C>(data: &[C]) -> Result<Matrix>
where
    C: AsRef<[f64]>,
{
    let n = data.len();
    let mut failure = None;
    let m = make_matrix(n, n, |i, j| {
        match correlation(data[i].as_ref(), data[j].as_ref()) {
            Ok(c) => c,
            Err(e) => {
                failure.get_or_insert(e);
                f64::NAN
            }
        }
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(m),
    }
}

const HIGH_TECH: [&str; 5] = ["MSFT", "GOOG", "FB", "AMZN", "AAPL"];

/// One closing price for one symbol on one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub symbol: String,
    pub date: NaiveDate,
    pub closing_price: f64,
}

impl StockPrice {
    pub fn is_high_tech(&self) -> bool {
        HIGH_TECH.contains(&self.symbol.as_str())
    }
}

fn split_row<'a>(row: &[&'a str]) -> anyhow::Result<(&'a str, &'a str, &'a str)> {
    match *row {
        [symbol, date, price] => Ok((symbol, date, price)),
        _ => bail!("expected 3 fields (symbol, date, closing_price), got {}", row.len()),
    }
}

/// Parses `[symbol, YYYY-MM-DD, closing_price]`.
pub fn parse_row(row: &[&str]) -> anyhow::Result<StockPrice> {
    let (symbol, date, price) = split_row(row)?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}", date))?;
    let closing_price: f64 = price
        .trim()
        .parse()
        .with_context(|| format!("Invalid closing price: {}", price))?;
    Ok(StockPrice {
        symbol: symbol.to_string(),
        date,
        closing_price,
    })
}

/// Like [`parse_row`] but also requires an upper-case symbol, returning
/// `None` for any malformed row.
pub fn try_parse_row(row: &[&str]) -> Option<StockPrice> {
    let (symbol, _, _) = split_row(row).ok()?;
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    parse_row(row).ok()
}

/// Parses every row, failing on the first bad one with its line number.
pub fn parse_rows<'a, I>(rows: I) -> anyhow::Result<Vec<StockPrice>>
where
    I: IntoIterator<Item = &'a [&'a str]>,
{
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            try_parse_row(row).ok_or_else(|| anyhow!("Malformed stock price on row {}: {:?}", i, row))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucketize_rounds_down() {
        assert_eq!(bucketize(7.5, 5.0), 5.0);
        assert_eq!(bucketize(-0.5, 10.0), -10.0);
        assert_eq!(bucketize(10.0, 10.0), 10.0);
    }

    #[test]
    fn histogram_counts() {
        let h = make_histogram(&[1.0, 2.0, 11.0, 12.0, 13.0, -4.0], 10.0).unwrap();
        let buckets: Vec<(f64, usize)> = h.iter().collect();
        assert_eq!(buckets, vec![(-10.0, 1), (0.0, 2), (10.0, 3)]);
        assert_eq!(h.count(15.0), 3);
        assert_eq!(h.count(100.0), 0);
        assert!(make_histogram(&[1.0], 0.0).is_err());
    }

    #[test]
    fn histogram_rejects_unbucketable_points() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                make_histogram(&[1.0, bad], 1.0),
                Err(MathError::InvalidParameter(_))
            ));
        }
        // 1e20 / 1.0 is past i64::MAX; it must not share a saturated bucket
        assert!(make_histogram(&[1e20, 5e20], 1.0).is_err());
        assert!(make_histogram(&[-1e20], 1.0).is_err());

        // the same points fit once the bucket is wide enough
        let h = make_histogram(&[1e20, 5e20], 1e10).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.count(1e20), 1);
        assert_eq!(h.count(f64::NAN), 0);
        assert_eq!(h.count(1e30), 0);
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let data = vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![2.0, 4.0, 6.0, 8.5],
            vec![4.0, 3.0, 2.0, 1.0],
        ];
        let m = correlation_matrix(&data).unwrap();
        assert_eq!(m.shape(), (3, 3));
        for i in 0..3 {
            assert!((m[(i, i)] - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert!((m[(i, j)] - m[(j, i)]).abs() < 1e-12);
            }
        }
        assert!((m[(0, 2)] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_matrix_propagates_errors() {
        let data = vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]];
        assert!(matches!(
            correlation_matrix(&data),
            Err(MathError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn parse_good_row() {
        let stock = parse_row(&["MSFT", "2018-12-14", "106.03"]).unwrap();
        assert_eq!(stock.symbol, "MSFT");
        assert_eq!(stock.closing_price, 106.03);
        assert_eq!(stock.date, NaiveDate::from_ymd_opt(2018, 12, 14).unwrap());
        assert!(stock.is_high_tech());
        assert_eq!(try_parse_row(&["MSFT", "2018-12-14", "106.03"]), Some(stock));
    }

    #[test]
    fn try_parse_rejects_bad_rows() {
        assert_eq!(try_parse_row(&["MSFT0", "2018-12-14", "106.03"]), None);
        assert_eq!(try_parse_row(&["MSFT", "2018-12--14", "106.03"]), None);
        assert_eq!(try_parse_row(&["MSFT", "2018-12-14", "x"]), None);
        assert_eq!(try_parse_row(&["MSFT", "2018-12-14"]), None);
    }

    #[test]
    fn parse_row_reports_context() {
        let err = parse_row(&["MSFT", "2018-12-14", "x"]).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid closing price"));
    }

    #[test]
    fn parse_rows_reports_row_number() {
        let good: &[&str] = &["AAPL", "2014-08-29", "102.06"];
        let bad: &[&str] = &["aapl", "2014-08-29", "102.06"];
        let prices = parse_rows(vec![good, good]).unwrap();
        assert_eq!(prices.len(), 2);
        let err = parse_rows(vec![good, bad]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
