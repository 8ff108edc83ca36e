use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points, Polygon};

use crate::config::BACKGROUND;
use crate::data::model::CellValue;
use crate::pages::{Category, ChartData, ChartKind, ChartSpec, ScatterPoint};

/// Largest angle drawn as one polygon. egui fills polygons as convex shapes.
const MAX_WEDGE: f64 = FRAC_PI_2;
/// Arc resolution.
const STEPS_PER_RADIAN: f64 = 24.0;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Render one chart with its title, or a "No data" placeholder.
pub fn chart(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    ui.strong(spec.title);

    if spec.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No data");
            });
        });
        return;
    }

    match (&spec.data, spec.kind) {
        (ChartData::Categories(cats), ChartKind::Pie) => pie_chart(ui, spec, cats, height),
        (ChartData::Categories(cats), _) => bar_chart(ui, spec, cats, height),
        (ChartData::Points(points), _) => scatter_chart(ui, spec, points, height),
    }
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

/// One bar per category, each its own series so the legend names it.
fn bar_chart(ui: &mut Ui, spec: &ChartSpec, cats: &[Category], height: f32) {
    Plot::new(spec.id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, cat) in cats.iter().enumerate() {
                let name = cat.key.to_string();
                let color = spec.colors.color_for(&cat.key);
                let bar = Bar::new(i as f64, cat.value)
                    .width(0.7)
                    .name(&name)
                    .fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&name).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, spec: &ChartSpec, cats: &[Category], height: f32) {
    let total: f64 = cats.iter().map(|c| c.value).sum();
    if total <= 0.0 {
        ui.label("No data");
        return;
    }

    Plot::new(spec.id)
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Start at 12 o'clock and run clockwise.
            let mut start = FRAC_PI_2;
            for cat in cats {
                let sweep = TAU * cat.value / total;
                let name = format!("{} ({:.1}%)", cat.key, 100.0 * cat.value / total);
                let color = spec.colors.color_for(&cat.key);
                for piece in wedge(start, -sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(piece))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, BACKGROUND))
                            .name(&name),
                    );
                }
                start -= sweep;
            }
        });
}

/// Unit-circle wedge from `start` over `sweep` radians (negative runs
/// clockwise), split into convex pieces of at most [`MAX_WEDGE`].
fn wedge(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep.abs() / MAX_WEDGE).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;

    (0..pieces)
        .map(|p| {
            let a0 = start + piece_sweep * p as f64;
            let steps = ((piece_sweep.abs() * STEPS_PER_RADIAN).ceil() as usize).max(1);
            let mut pts = Vec::with_capacity(steps + 2);
            pts.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = a0 + piece_sweep * s as f64 / steps as f64;
                pts.push([a.cos(), a.sin()]);
            }
            pts
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// One point series per colour category.
fn scatter_chart(ui: &mut Ui, spec: &ChartSpec, points: &[ScatterPoint], height: f32) {
    let mut series: BTreeMap<&CellValue, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        series.entry(&p.series).or_default().push([p.x, p.y]);
    }

    Plot::new(spec.id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (key, pts) in series {
                plot_ui.points(
                    Points::new(PlotPoints::new(pts))
                        .radius(2.5)
                        .color(spec.colors.color_for(key))
                        .name(key.to_string()),
                );
            }
        });
}
