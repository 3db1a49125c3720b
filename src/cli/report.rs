//! CLI commands for reports
//!
//! Sales and profit reports cover an inclusive range of UTC days. Every
//! report prints to the terminal or, with `--output`, exports CSV.

use chrono::{Datelike, NaiveDate, Utc};
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::parse_date;
use crate::error::{StorekeepError, StorekeepResult};
use crate::reports::{DateRange, InventoryValueReport, ProfitReport, SalesReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total sales over a date range
    Sales {
        /// Start date (YYYY-MM-DD), defaults to the first of this month
        #[arg(short, long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Revenue, cost and profit over a date range
    Profit {
        /// Start date (YYYY-MM-DD), defaults to the first of this month
        #[arg(short, long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cost and retail value of the stock on hand
    #[command(alias = "stock")]
    Inventory {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> StorekeepResult<()> {
    match cmd {
        ReportCommands::Sales { from, to, output } => {
            let report = SalesReport::generate(storage, resolve_range(from, to))?;
            match output {
                Some(path) => {
                    report.export_csv(&mut create_output(&path)?)?;
                    println!("Sales report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Profit { from, to, output } => {
            let report = ProfitReport::generate(storage, resolve_range(from, to))?;
            match output {
                Some(path) => {
                    report.export_csv(&mut create_output(&path)?)?;
                    println!("Profit report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Inventory { output } => {
            let report = InventoryValueReport::generate(storage)?;
            match output {
                Some(path) => {
                    report.export_csv(&mut create_output(&path)?)?;
                    println!("Inventory report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal()),
            }
        }
    }

    Ok(())
}

/// Fill in missing ends: month start to today
fn resolve_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> DateRange {
    let today = Utc::now().date_naive();
    let start = from.unwrap_or_else(|| today.with_day(1).unwrap_or(today));
    DateRange::new(start, to.unwrap_or(today))
}

fn create_output(path: &Path) -> StorekeepResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        StorekeepError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_range_kept() {
        let from = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap();
        assert_eq!(resolve_range(Some(from), Some(to)), DateRange::new(from, to));
    }

    #[test]
    fn test_default_range_is_month_to_date() {
        let range = resolve_range(None, None);
        let today = Utc::now().date_naive();
        assert_eq!(range.end, today);
        assert_eq!(range.start.day(), 1);
        assert_eq!(range.start.month(), today.month());
    }
}
