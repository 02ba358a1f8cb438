use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finance_core::cli::{self, OutputFormat, ReportKind, ReportOptions};
use finance_core::config::{paths::FinancePaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "finance",
    author = "Kaylee Beyene",
    version,
    about = "Exact money arithmetic and recurring-bill math for personal finance",
    long_about = "finance works in integer cents end to end. It parses and formats \
                  amounts, advances recurring dates with month-end clamping, and \
                  runs cash flow, category, credit card and projection reports over \
                  CSV transaction exports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a major-unit amount (e.g. 19.99) to cents
    Parse {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Render cents as a localized currency string
    Format {
        #[arg(allow_negative_numbers = true)]
        cents: i64,
        /// BCP 47 locale (default from settings)
        #[arg(short, long)]
        locale: Option<String>,
        /// ISO 4217 currency code (default from settings)
        #[arg(short, long)]
        currency: Option<String>,
    },

    /// Percentage of `part` over `total`, both in cents
    Percent {
        #[arg(allow_negative_numbers = true)]
        part: i64,
        #[arg(allow_negative_numbers = true)]
        total: i64,
        /// Allow results outside 0-100
        #[arg(long)]
        no_clamp: bool,
        /// Decimal places (default from settings)
        #[arg(short, long)]
        decimals: Option<u32>,
    },

    /// First occurrence of a recurring date on or after today
    Next {
        /// Seed date (YYYY-MM-DD or RFC 3339)
        seed: String,
        /// weekly, biweekly, monthly or yearly
        frequency: String,
        /// Reference day instead of today
        #[arg(long)]
        now: Option<String>,
    },

    /// Advance a date by one period
    Advance { date: String, frequency: String },

    /// List occurrences of a recurring date within a window
    Upcoming {
        seed: String,
        frequency: String,
        /// Window start (default today)
        #[arg(long)]
        from: Option<String>,
        /// Window end, inclusive
        #[arg(long)]
        until: String,
    },

    /// Monthly and yearly equivalents of a recurring amount in cents
    Convert {
        #[arg(allow_negative_numbers = true)]
        cents: i64,
        frequency: String,
    },

    /// Run a report over a CSV of transactions
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Utilization, risk and minimum payment for a credit card (cents)
    Credit {
        #[arg(allow_negative_numbers = true)]
        balance: i64,
        limit: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Project the end-of-month balance from this month's spending (cents)
    Project {
        #[arg(allow_negative_numbers = true)]
        balance: i64,
        month_expenses: i64,
        /// Reference day instead of today
        #[arg(long)]
        today: Option<String>,
        /// JSON file of recurring events still due this month
        #[arg(short, long)]
        recurring: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_env("FINANCE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    let output = match cli.command {
        Commands::Parse { amount } => cli::run_parse(&amount)?,
        Commands::Format {
            cents,
            locale,
            currency,
        } => cli::run_format(&settings, cents, locale.as_deref(), currency.as_deref())?,
        Commands::Percent {
            part,
            total,
            no_clamp,
            decimals,
        } => cli::run_percent(&settings, part, total, no_clamp, decimals)?,
        Commands::Next {
            seed,
            frequency,
            now,
        } => cli::run_next(&seed, &frequency, now.as_deref())?,
        Commands::Advance { date, frequency } => cli::run_advance(&date, &frequency)?,
        Commands::Upcoming {
            seed,
            frequency,
            from,
            until,
        } => cli::run_upcoming(&seed, &frequency, from.as_deref(), &until)?,
        Commands::Convert { cents, frequency } => cli::run_convert(&settings, cents, &frequency)?,
        Commands::Report {
            kind,
            file,
            format,
            start,
            end,
            top,
            output,
        } => {
            let options = ReportOptions {
                format,
                start,
                end,
                top,
            };
            let rendered = cli::run_report(&settings, kind, &file, &options)?;
            if let Some(path) = output {
                cli::report::write_output(&path, &rendered)?;
                format!("Report written to: {}", path.display())
            } else {
                rendered
            }
        }
        Commands::Credit {
            balance,
            limit,
            name,
            format,
        } => cli::run_credit(&settings, balance, limit, name.as_deref(), format)?,
        Commands::Project {
            balance,
            month_expenses,
            today,
            recurring,
            format,
        } => cli::run_project(
            &settings,
            balance,
            month_expenses,
            today.as_deref(),
            recurring.as_deref(),
            format,
        )?,
        Commands::Config => {
            let mut lines = vec![
                "finance-core Configuration".to_string(),
                "==========================".to_string(),
                format!("Config directory: {}", paths.base_dir().display()),
                format!("Settings file:    {}", paths.settings_file().display()),
                String::new(),
            ];
            lines.push(serde_json::to_string_pretty(&settings)?);
            lines.join("\n")
        }
    };

    let output = output.trim_end();
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
