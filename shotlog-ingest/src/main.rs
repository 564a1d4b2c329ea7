//! shotlog-ingest - launch monitor CSV import tool
//!
//! Imports one launch-monitor CSV export into the shot store, reporting
//! progress as rows are written, then prints the per-club statistics for
//! the new session and a sample of the mapped output.

use anyhow::Result;
use clap::Parser;
use shotlog_common::config::resolve_database_path;
use shotlog_common::db::init_database;
use shotlog_common::EventBus;
use shotlog_ingest::models::{ImportRequest, Vendor};
use shotlog_ingest::{aggregate, db, ingest};
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "shotlog-ingest", about = "Import a launch-monitor CSV export")]
struct Args {
    /// CSV file to import
    csv: PathBuf,

    /// Launch monitor vendor: gspro, rapsodo, foresight, trackman
    #[arg(long)]
    vendor: String,

    /// Identity of the uploading user
    #[arg(long)]
    owner: String,

    /// Session name
    #[arg(long, default_value = "")]
    session_name: String,

    /// Session notes
    #[arg(long, default_value = "")]
    notes: String,

    /// Session elevation in feet
    #[arg(long, default_value_t = 0.0)]
    elevation: f64,

    /// Database path (overrides SHOTLOG_DB and the config file)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let vendor: Vendor = args.vendor.parse()?;

    info!("Starting shotlog-ingest");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let db_path = resolve_database_path(args.db.as_deref().and_then(|p| p.to_str()));
    info!("Database: {}", db_path.display());

    let pool = init_database(&db_path).await?;
    let event_bus = EventBus::new(100);

    let request = ImportRequest {
        vendor,
        session_name: args.session_name,
        notes: args.notes,
        elevation: args.elevation,
        owner_id: args.owner,
    };

    let file = File::open(&args.csv)?;
    info!("Importing {} as {}", args.csv.display(), vendor);

    let mut last_reported = 0u32;
    let records = ingest::import_csv(&pool, &event_bus, file, &request, |pct| {
        // Log at 10% steps to keep large files readable
        let step = (pct / 10.0) as u32;
        if step > last_reported || pct >= 100.0 {
            last_reported = step;
            info!("Upload progress: {:.0}%", pct);
        }
    })
    .await?;

    let batch_id = records
        .first()
        .map(|r| r.batch_id.clone())
        .unwrap_or_default();

    let session = db::shots::fetch_session_records(&pool, &request.owner_id, &batch_id).await?;
    let stats = aggregate::compute_club_stats(&session);

    println!("Upload complete: {} rows saved (batch {})", records.len(), batch_id);
    println!();
    println!("Per-club statistics:");
    for (club, agg) in &stats {
        println!(
            "  {:<16} {:>3} shots  carry avg {:>6.1}  ({:.1} - {:.1})  ball speed avg {:>6.1}  spin avg {:>7.1}",
            club,
            agg.shot_count(),
            agg.carry.avg,
            agg.carry.min,
            agg.carry.max,
            agg.ball_speed.avg,
            agg.spin_rate.avg,
        );
    }

    let sample: Vec<_> = records.iter().take(3).collect();
    println!();
    println!("Sample output:");
    println!("{}", serde_json::to_string_pretty(&sample)?);

    Ok(())
}
