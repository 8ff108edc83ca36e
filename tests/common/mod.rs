use std::path::{Path, PathBuf};

/// Writes a small KPI export as CSV into `dir` and returns its path.
/// Region cells carry stray whitespace the way the raw spreadsheet does.
pub fn write_kpi_csv(dir: &Path) -> PathBuf {
    let path = dir.join("kpis.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer
        .write_record([
            "Most_Used_Region",
            "Rate_Plan_Desc",
            "Revenue_Segment",
            "Data_Segment",
            "Call_Segment",
            "rev",
            "total_data_usage",
            "total_og_usage",
            "aon",
        ])
        .unwrap();
    let rows: [[&str; 9]; 5] = [
        [" East ", "Bundle 2000", "High", "Heavy", "Light", "1200", "5000", "120", "900"],
        ["North", "Bundle 2000", "Medium", "Light", "Heavy", "600", "800", "300", "150"],
        ["North", "Basic", "Low", "Light", "Light", "100", "", "40", "30"],
        ["South  ", "Basic", "Low", "Light", "Light", "80", "250", "", "12"],
        ["", "Basic", "", "", "", "", "100", "10", ""],
    ];
    for row in rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();
    path
}
