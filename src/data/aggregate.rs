use std::collections::BTreeMap;

use super::filter::DerivedView;
use super::model::CellValue;
use crate::config::columns;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Group-by aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    /// Arithmetic mean of the non-missing values; NaN for a group with none.
    Mean,
    /// Number of non-missing values.
    Count,
}

/// One group of an [`AggregateSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    pub key: CellValue,
    /// Rows in the group, missing values included.
    pub rows: usize,
    pub value: f64,
}

/// Result of grouping a view by one column and reducing another.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSummary {
    pub group_column: String,
    pub value_column: String,
    pub op: AggregateOp,
    /// Ascending by group key.
    pub groups: Vec<GroupRow>,
}

impl AggregateSummary {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Default)]
struct Acc {
    rows: usize,
    n: usize,
    sum: f64,
}

/// Group `view` by `group_column` and reduce `value_column` with `op`.
///
/// Rows whose group key is missing are dropped. Non-numeric or missing
/// values are skipped inside each group.
pub fn aggregate(
    view: &DerivedView<'_>,
    group_column: &str,
    value_column: &str,
    op: AggregateOp,
) -> Result<AggregateSummary> {
    let dataset = view.dataset();
    dataset.require_column(group_column)?;
    dataset.require_column(value_column)?;

    let mut groups: BTreeMap<&CellValue, Acc> = BTreeMap::new();
    for rec in view.records() {
        let key = rec.get(group_column);
        if key.is_missing() {
            continue;
        }
        let acc = groups.entry(key).or_default();
        acc.rows += 1;
        if let Some(v) = rec.get(value_column).as_f64() {
            acc.n += 1;
            acc.sum += v;
        }
    }

    let groups = groups
        .into_iter()
        .map(|(key, acc)| GroupRow {
            key: key.clone(),
            rows: acc.rows,
            value: match op {
                AggregateOp::Mean if acc.n == 0 => f64::NAN,
                AggregateOp::Mean => acc.sum / acc.n as f64,
                AggregateOp::Count => acc.n as f64,
            },
        })
        .collect();

    Ok(AggregateSummary {
        group_column: group_column.to_string(),
        value_column: value_column.to_string(),
        op,
        groups,
    })
}

/// Occurrences of each non-missing value of `column`, most frequent first.
/// Ties keep ascending key order.
pub fn value_counts(view: &DerivedView<'_>, column: &str) -> Result<Vec<(CellValue, usize)>> {
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for cell in view.column(column)? {
        if !cell.is_missing() {
            *counts.entry(cell).or_default() += 1;
        }
    }
    let mut out: Vec<(CellValue, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.clone(), n))
        .collect();
    // Stable sort keeps the BTreeMap order among equal counts.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(out)
}

/// Sum of the numeric values of `column`; missing values contribute 0.
/// An empty view sums to `+0.0` (std's float `sum` starts from `-0.0`).
pub fn column_sum(view: &DerivedView<'_>, column: &str) -> Result<f64> {
    Ok(view
        .column(column)?
        .filter_map(CellValue::as_f64)
        .fold(0.0, |acc, v| acc + v))
}

/// Mean of the numeric values of `column`; NaN when there are none.
pub fn column_mean(view: &DerivedView<'_>, column: &str) -> Result<f64> {
    let (n, sum) = view
        .column(column)?
        .filter_map(CellValue::as_f64)
        .fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    Ok(if n == 0 { f64::NAN } else { sum / n as f64 })
}

// ---------------------------------------------------------------------------
// Overview metrics
// ---------------------------------------------------------------------------

/// Headline numbers for the Overview page. Means are NaN on an empty view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewMetrics {
    pub total_revenue: f64,
    pub avg_data_usage: f64,
    pub avg_call_usage: f64,
    pub avg_aon: f64,
}

impl OverviewMetrics {
    pub fn compute(view: &DerivedView<'_>) -> Result<Self> {
        Ok(Self {
            total_revenue: column_sum(view, columns::REVENUE)?,
            avg_data_usage: column_mean(view, columns::DATA_USAGE)?,
            avg_call_usage: column_mean(view, columns::OUTGOING_USAGE)?,
            avg_aon: column_mean(view, columns::AON)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Format with `decimals` places and comma thousands separators, like
/// Python's `{:,.2f}`: a negative value that rounds to zero keeps its sign
/// (`-0.00`). Non-finite values render as `N/A`.
pub fn format_metric(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let pos_from_end = len - i;
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(',');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::filter::{apply_filters, Choice, FilterSelection};
    use crate::data::model::{CustomerRecord, Dataset};

    fn record(pairs: &[(&str, CellValue)]) -> CustomerRecord {
        CustomerRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn kpi(region: &str, plan: &str, seg: Option<&str>, rev: Option<f64>) -> CustomerRecord {
        record(&[
            (columns::REGION, CellValue::from(region)),
            (columns::RATE_PLAN, CellValue::from(plan)),
            (
                columns::REVENUE_SEGMENT,
                seg.map_or(CellValue::Null, CellValue::from),
            ),
            (columns::REVENUE, rev.map_or(CellValue::Null, CellValue::Float)),
            (columns::DATA_USAGE, CellValue::Integer(10)),
            (columns::OUTGOING_USAGE, CellValue::Float(2.5)),
            (columns::AON, CellValue::Integer(365)),
        ])
    }

    fn dataset(records: Vec<CustomerRecord>) -> Dataset {
        let headers = [
            columns::REGION,
            columns::RATE_PLAN,
            columns::REVENUE_SEGMENT,
            columns::REVENUE,
            columns::DATA_USAGE,
            columns::OUTGOING_USAGE,
            columns::AON,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        Dataset::from_records(headers, records)
    }

    #[test]
    fn north_south_scenario() {
        let ds = dataset(vec![
            kpi("North", "A", Some("High"), Some(100.0)),
            kpi("South", "B", Some("Low"), Some(200.0)),
        ]);

        let north = apply_filters(&ds, &FilterSelection::new("North", Choice::All)).unwrap();
        assert_eq!(north.len(), 1);
        assert_eq!(column_sum(&north, columns::REVENUE).unwrap(), 100.0);

        let all = DerivedView::full(&ds);
        let by_region = aggregate(&all, columns::REGION, columns::REVENUE, AggregateOp::Mean).unwrap();
        let pairs: Vec<(String, f64)> = by_region
            .groups
            .iter()
            .map(|g| (g.key.to_string(), g.value))
            .collect();
        assert_eq!(
            pairs,
            vec![("North".to_string(), 100.0), ("South".to_string(), 200.0)]
        );
    }

    #[test]
    fn mean_skips_missing_values() {
        let ds = dataset(vec![
            kpi("North", "A", Some("High"), Some(100.0)),
            kpi("North", "A", Some("High"), None),
            kpi("North", "A", Some("High"), Some(f64::NAN)),
            kpi("North", "A", Some("High"), Some(300.0)),
            kpi("North", "A", Some("Low"), None),
        ]);
        let view = DerivedView::full(&ds);
        let mean = aggregate(&view, columns::REVENUE_SEGMENT, columns::REVENUE, AggregateOp::Mean).unwrap();
        assert_eq!(mean.groups[0].key, CellValue::from("High"));
        assert_eq!(mean.groups[0].value, 200.0);
        assert_eq!(mean.groups[0].rows, 4);
        assert!(mean.groups[1].value.is_nan());

        let count = aggregate(&view, columns::REVENUE_SEGMENT, columns::REVENUE, AggregateOp::Count).unwrap();
        assert_eq!(count.groups[0].value, 2.0);
        assert_eq!(count.groups[1].value, 0.0);

        assert_eq!(column_sum(&view, columns::REVENUE).unwrap(), 400.0);
        assert_eq!(column_mean(&view, columns::REVENUE).unwrap(), 200.0);
    }

    #[test]
    fn numeric_keys_group_by_value() {
        let ds = Dataset::from_records(
            vec![columns::DATA_SEGMENT.to_string(), columns::REVENUE.to_string()],
            [
                (CellValue::Integer(2), 10.0),
                (CellValue::Integer(1), 20.0),
                (CellValue::Float(1.0), 40.0),
                (CellValue::Float(1.5), 5.0),
            ]
            .into_iter()
            .map(|(seg, rev)| {
                record(&[
                    (columns::DATA_SEGMENT, seg),
                    (columns::REVENUE, CellValue::Float(rev)),
                ])
            })
            .collect(),
        );
        let view = DerivedView::full(&ds);
        let summary =
            aggregate(&view, columns::DATA_SEGMENT, columns::REVENUE, AggregateOp::Mean).unwrap();
        let pairs: Vec<(String, f64)> = summary
            .groups
            .iter()
            .map(|g| (g.key.to_string(), g.value))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("1".to_string(), 30.0),
                ("1.5".to_string(), 5.0),
                ("2".to_string(), 10.0),
            ]
        );
    }

    #[test]
    fn group_rows_sum_to_non_missing_keys() {
        let ds = dataset(vec![
            kpi("North", "A", Some("High"), Some(1.0)),
            kpi("South", "A", None, Some(2.0)),
            kpi("South", "B", Some("Low"), None),
            kpi("East", "B", Some("High"), Some(4.0)),
            kpi("East", "C", None, None),
        ]);
        let view = DerivedView::full(&ds);
        for group in [columns::REGION, columns::RATE_PLAN, columns::REVENUE_SEGMENT] {
            let summary = aggregate(&view, group, columns::REVENUE, AggregateOp::Count).unwrap();
            let total: usize = summary.groups.iter().map(|g| g.rows).sum();
            let non_missing = view.records().filter(|r| !r.get(group).is_missing()).count();
            assert_eq!(total, non_missing, "group column {group}");
        }
    }

    #[test]
    fn value_counts_most_frequent_first() {
        let ds = dataset(vec![
            kpi("North", "B", None, None),
            kpi("North", "A", None, None),
            kpi("North", "C", None, None),
            kpi("North", "C", None, None),
            kpi("North", "A", None, None),
            kpi("North", "C", None, None),
        ]);
        let counts = value_counts(&DerivedView::full(&ds), columns::RATE_PLAN).unwrap();
        assert_eq!(
            counts,
            vec![
                (CellValue::from("C"), 3),
                (CellValue::from("A"), 2),
                (CellValue::from("B"), 1),
            ]
        );
    }

    #[test]
    fn empty_view_metrics_are_not_available() {
        let ds = dataset(vec![kpi("North", "A", Some("High"), Some(100.0))]);
        let view = apply_filters(&ds, &FilterSelection::new("North", "Z")).unwrap();
        assert!(view.is_empty());

        let m = OverviewMetrics::compute(&view).unwrap();
        assert_eq!(m.total_revenue, 0.0);
        assert!(m.total_revenue.is_sign_positive());
        assert_eq!(format_metric(m.total_revenue, 0), "0");
        for mean in [m.avg_data_usage, m.avg_call_usage, m.avg_aon] {
            assert_eq!(format_metric(mean, 2), "N/A");
        }
        let summary = aggregate(&view, columns::REGION, columns::REVENUE, AggregateOp::Mean).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn missing_value_column_is_an_error() {
        let ds = dataset(vec![kpi("North", "A", None, None)]);
        let view = DerivedView::full(&ds);
        assert!(aggregate(&view, columns::DATA_SEGMENT, columns::DATA_USAGE, AggregateOp::Mean).is_err());
        assert!(column_mean(&view, "tenure").is_err());
    }

    #[test]
    fn metric_formatting() {
        assert_eq!(format_metric(1234567.891, 0), "1,234,568");
        assert_eq!(format_metric(1234.5, 2), "1,234.50");
        assert_eq!(format_metric(999.999, 2), "1,000.00");
        assert_eq!(format_metric(12.0, 2), "12.00");
        assert_eq!(format_metric(-4321.0, 0), "-4,321");
        assert_eq!(format_metric(-0.001, 2), "-0.00");
        assert_eq!(format_metric(-0.0, 0), "-0");
        assert_eq!(format_metric(0.0, 2), "0.00");
        assert_eq!(format_metric(f64::NAN, 2), "N/A");
        assert_eq!(format_metric(f64::INFINITY, 0), "N/A");
    }
}
