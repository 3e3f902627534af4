use std::path::{Path, PathBuf};

use accweekdays_core::ZoneSetting;
use accweekdays_core::description::ACCWEEKDAYS;
use accweekdays_core::kernel::ColumnMapping;
use accweekdays_core::schema;
use accweekdays_core::weekdays::accweekdays;
use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "accweekdays",
    about = "Count the weekday seconds between Unix timestamps"
)]
struct Cli {
    /// Zone for day-of-week and midnight: UTC, an IANA name, or "local"
    /// (defaults to $ACCWEEKDAYS_TZ, then UTC)
    #[arg(long)]
    timezone: Option<ZoneSetting>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate accweekdays for one interval (an omitted bound is NULL)
    Eval {
        /// Start, in seconds since the Unix epoch
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// End, in seconds since the Unix epoch
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the function's usage text
    Describe {
        /// Include the extended help with an example
        #[arg(long)]
        extended: bool,
    },

    /// Append a weekday-seconds column to a Parquet table
    Apply {
        /// Input Parquet file
        #[arg(short, long)]
        input: PathBuf,

        /// Output Parquet file
        #[arg(short, long)]
        output: PathBuf,

        /// Column holding the start timestamps
        #[arg(long, default_value = "start_ts")]
        start_column: String,

        /// Column holding the end timestamps
        #[arg(long, default_value = "end_ts")]
        end_column: String,

        /// Name of the appended result column
        #[arg(long, default_value = "weekday_seconds")]
        output_column: String,
    },
}

#[derive(Debug, Serialize)]
struct Evaluation {
    start: Option<i64>,
    end: Option<i64>,
    timezone: String,
    weekday_seconds: Option<i64>,
}

fn evaluate<Tz: TimeZone>(
    start: Option<i64>,
    end: Option<i64>,
    tz: &Tz,
    zone: ZoneSetting,
) -> Evaluation {
    Evaluation {
        start,
        end,
        timezone: zone.to_string(),
        weekday_seconds: accweekdays(start, end, tz),
    }
}

fn cmd_eval(zone: ZoneSetting, start: Option<i64>, end: Option<i64>, json: bool) -> Result<()> {
    let evaluation = match zone {
        ZoneSetting::Local => evaluate(start, end, &Local, zone),
        ZoneSetting::Named(tz) => evaluate(start, end, &tz, zone),
    };

    if json {
        let out = serde_json::to_string(&evaluation).context("failed to serialize result")?;
        println!("{out}");
    } else {
        match evaluation.weekday_seconds {
            Some(seconds) => println!("{seconds}"),
            None => println!("NULL"),
        }
    }

    Ok(())
}

fn cmd_describe(extended: bool) {
    println!("{}", ACCWEEKDAYS.usage());
    if extended {
        println!("{}", ACCWEEKDAYS.extended_usage());
    }
}

fn cmd_apply(
    zone: ZoneSetting,
    input: &Path,
    output: &Path,
    mapping: &ColumnMapping,
) -> Result<()> {
    info!("Applying accweekdays in zone {zone}");
    let summary = match zone {
        ZoneSetting::Local => schema::apply_parquet(input, output, mapping, &Local),
        ZoneSetting::Named(tz) => schema::apply_parquet(input, output, mapping, &tz),
    }
    .with_context(|| format!("failed to apply accweekdays to {}", input.display()))?;

    println!(
        "{} row(s) written to {}, {} NULL",
        summary.rows,
        output.display(),
        summary.null_rows
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let zone = match cli.timezone {
        Some(zone) => zone,
        None => ZoneSetting::from_env().context("failed to read timezone from environment")?,
    };

    match &cli.command {
        Commands::Eval { start, end, json } => {
            cmd_eval(zone, *start, *end, *json)?;
        }
        Commands::Describe { extended } => {
            cmd_describe(*extended);
        }
        Commands::Apply {
            input,
            output,
            start_column,
            end_column,
            output_column,
        } => {
            let mapping = ColumnMapping {
                start: start_column.clone(),
                end: end_column.clone(),
                output: output_column.clone(),
            };
            cmd_apply(zone, input, output, &mapping)?;
        }
    }

    Ok(())
}
