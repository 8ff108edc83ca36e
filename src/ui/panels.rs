use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Choice;
use crate::error::DashboardError;
use crate::pages::{
    overview_page, segmentation_page, MetricTile, OverviewPage, SegmentationPage, Selector,
    INSIGHTS,
};
use crate::state::{AppState, Page};
use crate::ui::plot;

const CHART_HEIGHT: f32 = 320.0;
const SMALL_CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} customers loaded", state.dataset.len()));
        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – current page
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let page = state.page;
    ui.heading(page.title());
    ui.add_space(6.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match page {
            Page::Overview => match overview_page(&state.dataset, &state.overview) {
                Ok(view) => {
                    state.status_message = None;
                    overview(ui, state, &view);
                }
                Err(e) => render_failed(ui, state, page, &e),
            },
            Page::Segmentation => match segmentation_page(&state.dataset, &state.segmentation) {
                Ok(view) => {
                    state.status_message = None;
                    segmentation(ui, state, &view);
                }
                Err(e) => render_failed(ui, state, page, &e),
            },
            Page::Insights => insights(ui),
        });
}

/// Show the failure in place of the page. Logged once per distinct message.
fn render_failed(ui: &mut Ui, state: &mut AppState, page: Page, err: &DashboardError) {
    let msg = format!("Error: {err}");
    if state.status_message.as_deref() != Some(msg.as_str()) {
        log::error!("{} page failed to render: {err}", page.label());
        state.status_message = Some(msg.clone());
    }
    ui.label(RichText::new(msg).color(Color32::RED));
}

fn overview(ui: &mut Ui, state: &mut AppState, view: &OverviewPage) {
    filter_row(ui, state, Page::Overview, &view.selectors);
    ui.add_space(8.0);

    metric_row(ui, &view.metrics);
    ui.add_space(12.0);

    ui.heading("Average Revenue by Region");
    plot::chart(ui, &view.revenue_by_region, CHART_HEIGHT);
    ui.add_space(12.0);

    ui.heading("Rate Plan Distribution");
    plot::chart(ui, &view.plan_distribution, CHART_HEIGHT);
}

fn segmentation(ui: &mut Ui, state: &mut AppState, view: &SegmentationPage) {
    filter_row(ui, state, Page::Segmentation, &view.selectors);
    ui.add_space(8.0);

    ui.columns(view.segments.len(), |cols| {
        for (col, spec) in cols.iter_mut().zip(&view.segments) {
            plot::chart(col, spec, SMALL_CHART_HEIGHT);
        }
    });
    ui.add_space(12.0);

    ui.heading("AON vs Revenue");
    plot::chart(ui, &view.aon_vs_revenue, CHART_HEIGHT);
}

fn insights(ui: &mut Ui) {
    for insight in INSIGHTS {
        ui.label(RichText::new(format!("✅ {insight}")).strong());
        ui.add_space(4.0);
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Region and plan combo boxes. A pick is written back to the page's own
/// selection after the row is drawn.
fn filter_row(ui: &mut Ui, state: &mut AppState, page: Page, selectors: &[Selector; 2]) {
    let [region, plan] = selectors;
    let mut picked_region = None;
    let mut picked_plan = None;

    ui.horizontal(|ui: &mut Ui| {
        picked_region = selector(ui, (page.label(), "region"), region);
        ui.add_space(16.0);
        picked_plan = selector(ui, (page.label(), "plan"), plan);
    });

    if let Some(choice) = picked_region {
        state.set_region(page, choice);
    }
    if let Some(choice) = picked_plan {
        state.set_plan(page, choice);
    }
}

fn selector(ui: &mut Ui, id: impl std::hash::Hash, sel: &Selector) -> Option<Choice> {
    let mut picked = None;
    ui.vertical(|ui: &mut Ui| {
        ui.label(sel.label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(sel.selected_label())
            .width(220.0)
            .show_ui(ui, |ui: &mut Ui| {
                for opt in &sel.options {
                    let is_selected = *opt == sel.selected;
                    if ui
                        .selectable_label(is_selected, opt.label(sel.sentinel))
                        .clicked()
                        && !is_selected
                    {
                        picked = Some(opt.clone());
                    }
                }
            });
    });
    picked
}

fn metric_row(ui: &mut Ui, tiles: &[MetricTile]) {
    ui.columns(tiles.len(), |cols| {
        for (col, tile) in cols.iter_mut().zip(tiles) {
            col.label(tile.label);
            col.label(RichText::new(&tile.value).size(28.0).strong());
        }
    });
}
