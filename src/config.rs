use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Spreadsheet loaded at startup, relative to the working directory.
pub const DATA_FILE: &str = "Cleaned_KPIs_Data.xlsx";

/// Sentinel shown first in the region selector; means "no region filter".
pub const ALL_REGIONS: &str = "All Regions";

/// Sentinel shown first in the rate-plan selector; means "no plan filter".
pub const ALL_PLANS: &str = "All Plans";

/// Column names the dashboard reads from the KPI table.
pub mod columns {
    pub const REGION: &str = "Most_Used_Region";
    pub const RATE_PLAN: &str = "Rate_Plan_Desc";
    pub const REVENUE_SEGMENT: &str = "Revenue_Segment";
    pub const DATA_SEGMENT: &str = "Data_Segment";
    pub const CALL_SEGMENT: &str = "Call_Segment";
    pub const REVENUE: &str = "rev";
    pub const DATA_USAGE: &str = "total_data_usage";
    pub const OUTGOING_USAGE: &str = "total_og_usage";
    pub const AON: &str = "aon";
}

// ---------------------------------------------------------------------------
// Window & theme
// ---------------------------------------------------------------------------

pub const WINDOW_TITLE: &str = "Customer Dashboard";
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 860.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [720.0, 480.0];

/// Page background (navy).
pub const BACKGROUND: Color32 = Color32::from_rgb(0x00, 0x1F, 0x3F);
/// Selector / widget background.
pub const PANEL: Color32 = Color32::from_rgb(0x00, 0x33, 0x66);
/// Text and chart accent (orange).
pub const ACCENT: Color32 = Color32::from_rgb(0xFF, 0xA5, 0x00);
