use std::fmt;

use super::model::{CellValue, CustomerRecord, Dataset};
use crate::config::{columns, ALL_PLANS, ALL_REGIONS};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Choice – one selector's current value
// ---------------------------------------------------------------------------

/// A selector value: the "no filter" sentinel or a concrete cell value
/// drawn from the column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Choice {
    #[default]
    All,
    Value(CellValue),
}

impl Choice {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// Label shown in a selector, using `sentinel` for [`Choice::All`].
    pub fn label(&self, sentinel: &str) -> String {
        match self {
            Choice::All => sentinel.to_string(),
            Choice::Value(v) => v.to_string(),
        }
    }

    fn matches(&self, cell: &CellValue) -> bool {
        match self {
            Choice::All => true,
            Choice::Value(v) => v == cell,
        }
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        Choice::Value(CellValue::from(s))
    }
}

// ---------------------------------------------------------------------------
// FilterSelection
// ---------------------------------------------------------------------------

/// The (region, plan) pair narrowing the dataset. Both conditions must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub region: Choice,
    pub plan: Choice,
}

impl FilterSelection {
    pub fn new(region: impl Into<Choice>, plan: impl Into<Choice>) -> Self {
        Self {
            region: region.into(),
            plan: plan.into(),
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}",
            self.region.label(ALL_REGIONS),
            self.plan.label(ALL_PLANS)
        )
    }
}

/// Selector options for `column`: [`Choice::All`] followed by the distinct
/// non-missing values in ascending order.
pub fn options(dataset: &Dataset, column: &str) -> Result<Vec<Choice>> {
    let values = dataset.distinct(column)?;
    Ok(std::iter::once(Choice::All)
        .chain(values.iter().cloned().map(Choice::Value))
        .collect())
}

// ---------------------------------------------------------------------------
// DerivedView – rows passing a selection
// ---------------------------------------------------------------------------

/// Indices of the records matching a selection, in dataset order.
#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> DerivedView<'a> {
    /// The whole dataset, unfiltered.
    pub fn full(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a CustomerRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    /// Cells of `column` for every row in the view.
    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &'a CellValue> + '_> {
        self.dataset.require_column(column)?;
        let column = column.to_string();
        Ok(self.records().map(move |r| r.get(&column)))
    }
}

/// Return the rows matching `selection`.
///
/// A concrete choice must equal the cell exactly (case-sensitive; region
/// cells are already trimmed by the loader). A value present nowhere yields
/// an empty view, not an error. A concrete choice on an absent column fails
/// with `MissingColumn`.
pub fn apply_filters<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Result<DerivedView<'a>> {
    let mut active: Vec<(&str, &Choice)> = Vec::with_capacity(2);
    for (column, choice) in [
        (columns::REGION, &selection.region),
        (columns::RATE_PLAN, &selection.plan),
    ] {
        if !choice.is_all() {
            dataset.require_column(column)?;
            active.push((column, choice));
        }
    }

    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| active.iter().all(|(col, choice)| choice.matches(rec.get(col))))
        .map(|(i, _)| i)
        .collect();

    Ok(DerivedView { dataset, indices })
}
