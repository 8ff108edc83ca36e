use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the KPI table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common spreadsheet / Pandas dtypes.
///
/// Cells key the group-by maps and option sets, so they carry a total order.
/// Integers and floats form one numeric class compared by value: `1` and
/// `1.0` are the same key, as are `0.0` and `-0.0`. Across classes the order
/// is null, bool, number, text. NaN sorts after every other number.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Float ordering where NaN is greater than any number and equal to itself.
/// `partial_cmp` already treats the two zeros as equal.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Exact integer/float comparison. The float side is narrowed back to `i64`
/// on a tie so large integers that round to the same `f64` stay distinct.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    match cmp_floats(i as f64, f) {
        Ordering::Equal => i.cmp(&(f as i64)),
        ord => ord,
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => cmp_floats(*a, *b),
            (Integer(a), Float(b)) => cmp_int_float(*a, *b),
            (Float(a), Integer(b)) => cmp_int_float(*b, *a).reverse(),
            (Text(a), Text(b)) => a.cmp(b),
            (a, b) => a.class().cmp(&b.class()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    // Equal cells must hash alike, so whole floats hash as the integer they
    // equal and every NaN hashes the same.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class().hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(v) if v.is_nan() => u64::MAX.hash(state),
            CellValue::Float(v) if v.fract() == 0.0 && (*v as i64) as f64 == *v => {
                (*v as i64).hash(state)
            }
            CellValue::Float(v) => v.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("<null>"),
            CellValue::Bool(b) => fmt::Display::fmt(b, f),
            CellValue::Integer(i) => fmt::Display::fmt(i, f),
            // `-0.0` is the same key as `0.0` and prints like it.
            CellValue::Float(v) if *v == 0.0 => f.write_str("0"),
            CellValue::Float(v) => fmt::Display::fmt(v, f),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl CellValue {
    /// Rank across kinds: null, bool, number, text.
    fn class(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Integer(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Numeric view of the cell. `None` for text, bools, nulls and NaN,
    /// which aggregations skip.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Missing in the Pandas sense: null or a float NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// CustomerRecord – one row of the KPI table
// ---------------------------------------------------------------------------

/// A single customer (one row of the source sheet): column_name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRecord {
    pub cells: BTreeMap<String, CellValue>,
}

impl CustomerRecord {
    pub fn new(cells: BTreeMap<String, CellValue>) -> Self {
        Self { cells }
    }

    /// Value of `column`; absent cells read as [`CellValue::Null`].
    pub fn get(&self, column: &str) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        self.cells.get(column).unwrap_or(NULL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
///
/// Read-only once built: every consumer holds it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All customer rows, in file order.
    pub records: Vec<CustomerRecord>,
    /// Column names in header order.
    pub column_names: Vec<String>,
    /// For each column the sorted set of distinct non-missing values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build column indices from parsed rows. `column_names` keeps the header
    /// order; columns only seen in records are appended in name order.
    pub fn from_records(column_names: Vec<String>, records: Vec<CustomerRecord>) -> Self {
        let mut column_names = column_names;
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = column_names
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for rec in &records {
            for (col, val) in &rec.cells {
                let entry = unique_values.entry(col.clone()).or_insert_with(|| {
                    column_names.push(col.clone());
                    BTreeSet::new()
                });
                if !val.is_missing() {
                    entry.insert(val.clone());
                }
            }
        }

        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.unique_values.contains_key(column)
    }

    /// Fail with [`DashboardError::MissingColumn`] unless `column` exists.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(DashboardError::missing_column(column))
        }
    }

    /// Sorted distinct non-missing values of `column`.
    pub fn distinct(&self, column: &str) -> Result<&BTreeSet<CellValue>> {
        self.unique_values
            .get(column)
            .ok_or_else(|| DashboardError::missing_column(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> CustomerRecord {
        CustomerRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn hash_of(v: &CellValue) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn ordering_ranks_null_first_then_numbers_then_text() {
        let mut vals = vec![
            CellValue::from("b"),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::Bool(true),
            CellValue::from("a"),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Float(1.5),
                CellValue::Integer(3),
                CellValue::from("a"),
                CellValue::from("b"),
            ]
        );
    }

    #[test]
    fn integers_and_floats_compare_by_value() {
        let mut vals = vec![
            CellValue::Integer(2),
            CellValue::Float(1.5),
            CellValue::Float(f64::NAN),
            CellValue::Integer(-1),
        ];
        vals.sort();
        assert_eq!(vals[0], CellValue::Integer(-1));
        assert_eq!(vals[1], CellValue::Float(1.5));
        assert_eq!(vals[2], CellValue::Integer(2));
        assert!(vals[3].is_missing());

        assert_eq!(CellValue::Integer(1), CellValue::Float(1.0));
        assert_eq!(hash_of(&CellValue::Integer(1)), hash_of(&CellValue::Float(1.0)));
        assert_ne!(CellValue::Integer(1), CellValue::Float(1.25));
        assert!(CellValue::Integer(i64::MAX) > CellValue::Integer(i64::MAX - 1));
    }

    #[test]
    fn signed_zeros_are_one_key() {
        let neg = CellValue::Float(-0.0);
        let pos = CellValue::Float(0.0);
        assert_eq!(neg, pos);
        assert_eq!(neg.cmp(&pos), Ordering::Equal);
        assert_eq!(hash_of(&neg), hash_of(&pos));
        assert_eq!(hash_of(&neg), hash_of(&CellValue::Integer(0)));
        assert_eq!(neg.to_string(), "0");

        let set: BTreeSet<CellValue> = [neg, pos, CellValue::Integer(0)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn mixed_numeric_cells_share_one_distinct_value() {
        let ds = Dataset::from_records(
            vec!["seg".into()],
            vec![
                record(&[("seg", CellValue::Integer(1))]),
                record(&[("seg", CellValue::Float(1.0))]),
                record(&[("seg", CellValue::Integer(2))]),
            ],
        );
        let labels: Vec<String> = ds.distinct("seg").unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, vec!["1", "2"]);
    }

    #[test]
    fn nan_is_missing_and_not_numeric() {
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::from("4").as_f64(), None);
    }

    #[test]
    fn unique_values_skip_missing_cells() {
        let ds = Dataset::from_records(
            vec!["region".into()],
            vec![
                record(&[("region", CellValue::from("North"))]),
                record(&[("region", CellValue::Null)]),
                record(&[("region", CellValue::from("North"))]),
                record(&[("extra", CellValue::Integer(1))]),
            ],
        );
        assert_eq!(ds.column_names, vec!["region", "extra"]);
        assert!(!ds.is_empty());
        assert!(Dataset::default().is_empty());
        assert_eq!(ds.distinct("region").unwrap().len(), 1);
        assert!(ds.require_column("extra").is_ok());
        assert!(matches!(
            ds.require_column("nope"),
            Err(DashboardError::MissingColumn { column }) if column == "nope"
        ));
    }

    #[test]
    fn absent_cell_reads_as_null() {
        let rec = record(&[("a", CellValue::Integer(1))]);
        assert_eq!(rec.get("b"), &CellValue::Null);
    }
}
