use std::path::PathBuf;

use anyhow::bail;
use chrono::Datelike;

use crate::{
    daily::{DailyMonth, day_key, day_meta_label, month_grid_monday, month_key, parse_day_key},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CalendarArg {
    /// Path to a month manifest produced by the `daily` command
    #[arg(long)]
    manifest: PathBuf,
}

/// Render a month manifest as a Monday-start calendar grid; assigned days
/// are marked and listed with their game and winner below the grid.
pub(crate) fn run(arg: &CalendarArg) -> anyhow::Result<()> {
    let manifest: DailyMonth = util::read_json_file("manifest", &arg.manifest)?;
    let Some(first_key) = manifest.keys().next() else {
        bail!("manifest contains no days");
    };
    let Some(first) = parse_day_key(first_key) else {
        bail!("manifest has a malformed day key: '{first_key}'");
    };
    let Some(grid) = month_grid_monday(first.year(), first.month()) else {
        bail!("cannot build a calendar grid for {}", month_key(first));
    };

    println!("{}", month_key(first));
    println!("Mon  Tue  Wed  Thu  Fri  Sat  Sun");
    for week in grid {
        let mut line = String::new();
        for date in week {
            if date.month() == first.month() {
                let marker = if manifest.contains_key(&day_key(date)) {
                    '*'
                } else {
                    ' '
                };
                line.push_str(&format!("{:>3}{marker} ", date.day()));
            } else {
                line.push_str("     ");
            }
        }
        println!("{}", line.trim_end());
    }

    println!();
    for (key, day) in &manifest {
        println!("{key}  {}", day_meta_label(day));
    }
    Ok(())
}
