//! Page builders: pure functions from (dataset, selection) to what the UI
//! draws. Nothing here touches egui widgets, so every page can be checked
//! without a window.

use crate::color::ColorMap;
use crate::config::{columns, ALL_PLANS, ALL_REGIONS};
use crate::data::aggregate::{aggregate, format_metric, value_counts, AggregateOp, OverviewMetrics};
use crate::data::filter::{apply_filters, options, Choice, DerivedView, FilterSelection};
use crate::data::model::{CellValue, Dataset};
use crate::error::Result;

pub const INSIGHTS: [&str; 5] = [
    "Bundle 2000 increased data usage but slightly reduced revenue.",
    "Medium Revenue customers show strong potential for upselling.",
    "High Revenue customers are loyal — reward them with retention incentives.",
    "Low usage customers should receive promotional offers to increase engagement.",
    "Monitor new customers (low AON) for early churn detection.",
];

// ---------------------------------------------------------------------------
// Render directives
// ---------------------------------------------------------------------------

/// A combo box: label, options (sentinel first) and the current choice.
#[derive(Debug, Clone)]
pub struct Selector {
    pub label: &'static str,
    pub sentinel: &'static str,
    pub options: Vec<Choice>,
    pub selected: Choice,
}

impl Selector {
    fn build(
        dataset: &Dataset,
        label: &'static str,
        column: &str,
        sentinel: &'static str,
        selected: &Choice,
    ) -> Result<Self> {
        Ok(Self {
            label,
            sentinel,
            options: options(dataset, column)?,
            selected: selected.clone(),
        })
    }

    pub fn selected_label(&self) -> String {
        self.selected.label(self.sentinel)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Scatter,
}

/// One bar or pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub key: CellValue,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Value of the colour column for this row.
    pub series: CellValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Categories(Vec<Category>),
    Points(Vec<ScatterPoint>),
}

/// A chart ready for the plotting surface.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub data: ChartData,
    pub colors: ColorMap,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Categories(c) => c.is_empty(),
            ChartData::Points(p) => p.is_empty(),
        }
    }

    /// Bar chart of a group-by mean; groups without any numeric value are
    /// left out.
    fn mean_bars(
        view: &DerivedView<'_>,
        id: &'static str,
        title: &'static str,
        group_column: &'static str,
        value_column: &'static str,
    ) -> Result<Self> {
        let summary = aggregate(view, group_column, value_column, AggregateOp::Mean)?;
        let categories: Vec<Category> = summary
            .groups
            .into_iter()
            .filter(|g| g.value.is_finite())
            .map(|g| Category {
                key: g.key,
                value: g.value,
            })
            .collect();
        Ok(Self {
            id,
            title,
            kind: ChartKind::Bar,
            x_label: group_column,
            y_label: value_column,
            colors: ColorMap::new(categories.iter().map(|c| &c.key)),
            data: ChartData::Categories(categories),
        })
    }
}

fn selectors(dataset: &Dataset, selection: &FilterSelection) -> Result<[Selector; 2]> {
    Ok([
        Selector::build(
            dataset,
            "🌍 Select Region",
            columns::REGION,
            ALL_REGIONS,
            &selection.region,
        )?,
        Selector::build(
            dataset,
            "📦 Select Rate Plan",
            columns::RATE_PLAN,
            ALL_PLANS,
            &selection.plan,
        )?,
    ])
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OverviewPage {
    pub selectors: [Selector; 2],
    pub rows: usize,
    pub metrics: Vec<MetricTile>,
    pub revenue_by_region: ChartSpec,
    pub plan_distribution: ChartSpec,
}

pub fn overview_page(dataset: &Dataset, selection: &FilterSelection) -> Result<OverviewPage> {
    let selectors = selectors(dataset, selection)?;
    let view = apply_filters(dataset, selection)?;

    let m = OverviewMetrics::compute(&view)?;
    let metrics = vec![
        MetricTile {
            label: "Total Revenue",
            value: format_metric(m.total_revenue, 0),
        },
        MetricTile {
            label: "Avg Data Usage",
            value: format_metric(m.avg_data_usage, 2),
        },
        MetricTile {
            label: "Avg Call Usage",
            value: format_metric(m.avg_call_usage, 2),
        },
        MetricTile {
            label: "Avg AON",
            value: format_metric(m.avg_aon, 2),
        },
    ];

    let revenue_by_region = ChartSpec::mean_bars(
        &view,
        "rev_by_region",
        "Average Revenue by Region",
        columns::REGION,
        columns::REVENUE,
    )?;

    let slices: Vec<Category> = value_counts(&view, columns::RATE_PLAN)?
        .into_iter()
        .map(|(key, n)| Category {
            key,
            value: n as f64,
        })
        .collect();
    let plan_distribution = ChartSpec {
        id: "plan_distribution",
        title: "Rate Plan Distribution",
        kind: ChartKind::Pie,
        x_label: columns::RATE_PLAN,
        y_label: "Count",
        colors: ColorMap::new(slices.iter().map(|c| &c.key)),
        data: ChartData::Categories(slices),
    };

    Ok(OverviewPage {
        selectors,
        rows: view.len(),
        metrics,
        revenue_by_region,
        plan_distribution,
    })
}

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SegmentationPage {
    pub selectors: [Selector; 2],
    pub rows: usize,
    /// Revenue, data and call segments, shown side by side.
    pub segments: [ChartSpec; 3],
    pub aon_vs_revenue: ChartSpec,
}

pub fn segmentation_page(dataset: &Dataset, selection: &FilterSelection) -> Result<SegmentationPage> {
    let selectors = selectors(dataset, selection)?;
    let view = apply_filters(dataset, selection)?;

    let segments = [
        ChartSpec::mean_bars(
            &view,
            "rev_by_segment",
            "Revenue by Segment",
            columns::REVENUE_SEGMENT,
            columns::REVENUE,
        )?,
        ChartSpec::mean_bars(
            &view,
            "data_by_segment",
            "Data Usage by Segment",
            columns::DATA_SEGMENT,
            columns::DATA_USAGE,
        )?,
        ChartSpec::mean_bars(
            &view,
            "calls_by_segment",
            "Call Usage by Segment",
            columns::CALL_SEGMENT,
            columns::OUTGOING_USAGE,
        )?,
    ];

    for col in [columns::AON, columns::REVENUE, columns::REVENUE_SEGMENT] {
        dataset.require_column(col)?;
    }
    let points: Vec<ScatterPoint> = view
        .records()
        .filter_map(|r| {
            Some(ScatterPoint {
                x: r.get(columns::AON).as_f64()?,
                y: r.get(columns::REVENUE).as_f64()?,
                series: r.get(columns::REVENUE_SEGMENT).clone(),
            })
        })
        .collect();
    let aon_vs_revenue = ChartSpec {
        id: "aon_vs_rev",
        title: "AON vs Revenue",
        kind: ChartKind::Scatter,
        x_label: columns::AON,
        y_label: columns::REVENUE,
        colors: ColorMap::new(points.iter().map(|p| &p.series).filter(|s| !s.is_missing())),
        data: ChartData::Points(points),
    };

    Ok(SegmentationPage {
        selectors,
        rows: view.len(),
        segments,
        aon_vs_revenue,
    })
}
