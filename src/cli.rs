use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::report::SpcReport;
use crate::sources::{Source, SourceClient};
use crate::spc::dates::{DateFormat, DEFAULT_DATE_FORMAT};
use crate::spc::pipeline::{self, PipelineConfig, SpcTables};
use crate::spc::query::{chart_data, ChartUpdate, ViewMode};

#[derive(Parser)]
#[command(name = "spcdash")]
#[command(author, version, about = "Statistical Process Control for scheduled service jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct InputArgs {
    /// Schedule CSV, a local path or an http(s) URL
    #[arg(short, long, env = "SPC_SCHEDULE")]
    schedule: String,

    /// Completion log CSV, a local path or an http(s) URL
    #[arg(short, long, env = "SPC_COMPLETIONS")]
    completions: String,

    /// chrono format of every date column
    #[arg(short = 'f', long, env = "SPC_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full SPC report: visits, inspections, exceptions, compliance and traces
    Report {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Chart data for a single job type
    Chart {
        #[command(flatten)]
        input: InputArgs,

        /// Job type, as found in the schedule's Description column
        #[arg(short, long)]
        job_type: String,

        /// Individual visits or totals per inspection
        #[arg(short, long, value_enum, default_value_t = ViewMode::Individual)]
        view: ViewMode,
    },
}

struct LoadedTables {
    tables: SpcTables,
    scheduled_jobs: usize,
    schedule: Source,
    completions: Source,
}

impl InputArgs {
    async fn load(&self) -> Result<LoadedTables> {
        let schedule = Source::parse(&self.schedule)?;
        let completions = Source::parse(&self.completions)?;
        let config = PipelineConfig {
            date_format: DateFormat::new(&self.date_format)?,
        };
        info!("Reading dates as {}", config.date_format.as_str());

        let client = SourceClient::new()?;
        let (schedule_rows, completion_rows) = client.load_tables(&schedule, &completions).await?;
        let tables = pipeline::run(&schedule_rows, &completion_rows, &config)?;

        Ok(LoadedTables {
            tables,
            scheduled_jobs: schedule_rows.len(),
            schedule,
            completions,
        })
    }
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Report { input } => {
                info!("Building SPC report from {}", input.schedule);

                let loaded = input.load().await?;
                let report = SpcReport::new(
                    loaded.tables,
                    loaded.scheduled_jobs,
                    loaded.schedule.to_string(),
                    loaded.completions.to_string(),
                );

                self.emit(&report)
            }
            Commands::Chart {
                input,
                job_type,
                view,
            } => {
                info!("Building {view:?} chart for job type: {job_type}");

                let loaded = input.load().await?;
                let update = chart_data(&loaded.tables, job_type, *view);

                if update == ChartUpdate::NoUpdate {
                    info!("No data for job type {job_type:?}, chart left unchanged");
                }

                self.emit(&update)
            }
        }
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        // Serialize to JSON
        let json_output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        // Write to output
        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}
