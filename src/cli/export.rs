//! CLI commands for data export

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::export::{default_export_file, export_full_json, export_month_csv};
use crate::models::MonthPeriod;
use crate::services::{BudgetClient, Clock};
use crate::storage::{BudgetStore, EntrySort};

use super::resolve_month;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export one month's entries to CSV
    Csv {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<MonthPeriod>,
        /// Row order: date-desc, date-asc, amount-desc, amount-asc
        #[arg(short, long)]
        sort: Option<EntrySort>,
        /// Output file (default: a timestamped file in the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export every year, month and entry to JSON
    Json {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print
        #[arg(long)]
        pretty: bool,
    },
}

fn create_file(path: &PathBuf) -> BudgetResult<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| BudgetError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
    }
    let file = File::create(path)
        .map_err(|e| BudgetError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    Ok(BufWriter::new(file))
}

/// Handle export commands
pub async fn handle_export_command<S: BudgetStore>(
    client: &BudgetClient<S>,
    settings: &Settings,
    paths: &BudgetPaths,
    cmd: ExportCommands,
) -> BudgetResult<()> {
    match cmd {
        ExportCommands::Csv {
            month,
            sort,
            output,
        } => {
            let target = resolve_month(client, month).await?;
            let output =
                output.unwrap_or_else(|| default_export_file(&paths.export_dir(), client.clock().now()));

            let mut writer = create_file(&output)?;
            let count = export_month_csv(
                client,
                target.id,
                sort.unwrap_or(settings.default_entry_sort),
                &mut writer,
            )
            .await?;
            writer.flush()?;

            println!("Exported {} entries to {}", count, output.display());
        }

        ExportCommands::Json { output, pretty } => match output {
            Some(path) => {
                let mut writer = create_file(&path)?;
                let export = export_full_json(client, &mut writer, pretty).await?;
                writer.flush()?;
                println!(
                    "Exported {} years, {} months, {} entries to {}",
                    export.metadata.year_count,
                    export.metadata.month_count,
                    export.metadata.entry_count,
                    path.display()
                );
            }
            None => {
                let mut buffer = Vec::new();
                export_full_json(client, &mut buffer, pretty).await?;
                let mut stdout = io::stdout().lock();
                stdout.write_all(&buffer)?;
                writeln!(stdout)?;
            }
        },
    }

    Ok(())
}
