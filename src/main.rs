//! CLI entry point for `enronscan`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use enronscan::config;
use enronscan::error::ScanError;
use enronscan::ingest;
use enronscan::store::{reports, MailStore};

#[derive(Parser)]
#[command(
    name = "enronscan",
    version,
    about = "Ingest Enron-style mail dumps into SQLite and run the standard reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mail corpus directory (shorthand: ingest, then print the
    /// fastest-responses report)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// SQLite database path (default: config, then ./enron.sqlite)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a directory of mail files
    Ingest {
        dir: PathBuf,
    },
    /// Run one of the fixed analytical reports
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

#[derive(ValueEnum, Clone, Copy)]
enum ReportKind {
    /// Per-receiver daily mail counts
    Daily,
    /// Receiver(s) of the most direct mails
    TopDirect,
    /// Sender(s) of the most broadcast mails
    TopBroadcast,
    /// Five fastest response times
    Fastest,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let db = config::db_path(&config, cli.db.as_ref());
    let extension = config.ingest.extension.clone();

    match cli.command {
        Some(Commands::Ingest { dir }) => {
            cmd_ingest(&dir, &db, &extension)?;
            Ok(())
        }
        Some(Commands::Report { kind, json }) => cmd_report(&db, kind, json),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => {
            let Some(dir) = cli.dir else {
                // Wrong invocation: print usage and exit non-zero.
                Cli::command().print_help()?;
                std::process::exit(2);
            };
            cmd_ingest(&dir, &db, &extension)?;
            cmd_report(&db, ReportKind::Fastest, false)
        }
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "enronscan.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "enronscan", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Ingest a corpus directory and print a summary table.
fn cmd_ingest(dir: &Path, db: &Path, extension: &str) -> anyhow::Result<ingest::IngestStats> {
    if !dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", dir.display());
    }

    let mut store = MailStore::open(db)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Ingesting [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let stats = ingest::ingest_directory(
        dir,
        &mut store,
        extension,
        Some(&|current, total| {
            pb.set_length(total);
            pb.set_position(current);
        }),
    )?;
    pb.finish_and_clear();
    let elapsed = start.elapsed();

    let (team_rows, mail_rows) = store.row_counts()?;

    use humansize::{format_size, BINARY};
    let db_size = std::fs::metadata(db).map(|m| m.len()).unwrap_or(0);

    println!();
    println!("  {:<22} {}", "Corpus", dir.display());
    println!("  {:<22} {}", "Files seen", stats.files_seen);
    println!("  {:<22} {}", "Imported", stats.imported);
    println!("  {:<22} {}", "Skipped (no id)", stats.skipped_no_id);
    println!("  {:<22} {}", "Failed", stats.failed);
    println!("  {:<22} {}", "Team rows", team_rows);
    println!("  {:<22} {}", "Mail rows", mail_rows);
    println!("  {:<22} {}", "Database size", format_size(db_size, BINARY));
    println!("  {:<22} {:.2?}", "Elapsed", elapsed);
    println!();

    Ok(stats)
}

/// Run one fixed report against an existing database.
fn cmd_report(db: &Path, kind: ReportKind, json: bool) -> anyhow::Result<()> {
    if !db.exists() {
        return Err(ScanError::DatabaseNotFound(db.to_path_buf()).into());
    }
    let store = MailStore::open(db)?;

    match kind {
        ReportKind::Daily => {
            let rows = reports::daily_receiver_counts(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!();
                println!("  {:<12} {:<40} {:>6}", "Date", "Receiver", "Mails");
                println!("  {}", "-".repeat(60));
                for row in &rows {
                    println!(
                        "  {:<12} {:<40} {:>6}",
                        row.date.as_deref().unwrap_or("-"),
                        row.receiver,
                        row.count
                    );
                }
                println!();
            }
        }
        ReportKind::TopDirect => {
            print_address_counts("Top direct-mail receiver(s)", &reports::top_direct_receivers(&store)?, json)?;
        }
        ReportKind::TopBroadcast => {
            print_address_counts("Top broadcast sender(s)", &reports::top_broadcast_senders(&store)?, json)?;
        }
        ReportKind::Fastest => {
            let rows = reports::fastest_responses(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!();
                println!("  Fastest responses:");
                println!("  {:<24} {:<40} {:>12}", "MailID", "Subject", "Seconds");
                println!("  {}", "-".repeat(78));
                for row in &rows {
                    let subject: String = row.subject.chars().take(39).collect();
                    println!(
                        "  {:<24} {:<40} {:>12.1}",
                        row.mail_id, subject, row.response_time
                    );
                }
                println!();
            }
        }
    }
    Ok(())
}

fn print_address_counts(
    title: &str,
    rows: &[reports::AddressCount],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }
    println!();
    println!("  {title}:");
    for row in rows {
        println!("    {:>6}  {}", row.count, row.address);
    }
    println!();
    Ok(())
}
