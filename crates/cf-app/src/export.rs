//! CSV export of chart series and profiles.

use std::fmt::Write as _;
use std::path::Path;

use cf_sim::ProfilePoint;

use crate::error::AppResult;

/// `time_h,<variable>` CSV for a series.
pub fn series_to_csv(variable: &str, series: &[(f64, f64)]) -> String {
    let mut csv = format!("time_h,{}\n", variable);
    for (t, v) in series {
        let _ = writeln!(csv, "{},{}", t, v);
    }
    csv
}

/// `length_m,temperature_c` CSV for a temperature profile.
pub fn profile_to_csv(profile: &[ProfilePoint]) -> String {
    let mut csv = String::from("length_m,temperature_c\n");
    for p in profile {
        let _ = writeln!(csv, "{},{}", p.length_m, p.temperature_c);
    }
    csv
}

pub fn write_csv(path: &Path, csv: &str) -> AppResult<()> {
    std::fs::write(path, csv)?;
    Ok(())
}
