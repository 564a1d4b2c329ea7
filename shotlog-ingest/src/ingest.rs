//! Row mapping and import orchestration
//!
//! `process_import` is the pure transformation from parsed CSV rows to
//! canonical shot records; `import_csv` is the end-to-end front door
//! (read → pre-check → map → upload).

use crate::csv_file::{self, RawRow};
use crate::db;
use crate::error::Result;
use crate::models::{ImportRequest, ShotRecord};
use crate::normalize;
use crate::vendors;
use shotlog_common::{time, EventBus};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::io::Read;
use tracing::info;

/// Transform parsed rows into canonical shot records
///
/// One batch id (`batch_<epoch-millis>`) and one upload timestamp are
/// generated per call and shared by every record. Order is preserved and
/// `row_index` reflects source position. A row with no mappable column
/// still produces a record (all metrics absent, club "Unknown"); rows are
/// never dropped here. Whole-file rejection happens in the header
/// pre-check.
///
/// Pure transformation: no I/O.
pub fn process_import(rows: &[RawRow], request: &ImportRequest) -> Result<Vec<ShotRecord>> {
    let table = vendors::column_table_for(request.vendor.as_str())?;

    let batch_id = format!("batch_{}", time::now().timestamp_millis());
    let uploaded_at = time::now();

    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            // Apply the vendor column mapping; when two source columns
            // target the same canonical field, the later table entry wins
            let mut mapped: HashMap<&'static str, &str> = HashMap::new();
            for (source, canonical) in table {
                if let Some(raw) = row.get(*source) {
                    mapped.insert(*canonical, raw.as_str());
                }
            }

            let metric = |field: &'static str| -> Option<f64> {
                mapped.get(field).map(|raw| {
                    vendors::unit_adjust(request.vendor, field, normalize::parse_number(raw))
                })
            };

            // Spin may live in a column outside the vendor mapping
            let spin_rate = metric("spin_rate").or_else(|| normalize::spin_fallback(row));

            ShotRecord {
                owner_id: request.owner_id.clone(),
                batch_id: batch_id.clone(),
                vendor: request.vendor,
                row_index: index as i64,
                club: normalize::club_from_row(row),
                ball_speed: metric("ball_speed"),
                club_speed: metric("club_speed"),
                vla: metric("vla"),
                peak_height: metric("peak_height"),
                descent_angle: metric("descent_angle"),
                spin_rate,
                carry_distance: metric("carry_distance"),
                side_total: metric("side_total"),
                total_distance: metric("total_distance"),
                session_name: request.session_name.clone(),
                notes: request.notes.clone(),
                elevation: request.elevation,
                uploaded_at,
            }
        })
        .collect();

    Ok(records)
}

/// Import one CSV export end to end
///
/// Reads the file, rejects it if its headers share nothing with the
/// vendor's schema, maps every row, and uploads the batch in one
/// transaction. `on_progress` receives a non-decreasing percentage in
/// [0, 100] as rows are written. Returns the mapped records on success.
pub async fn import_csv<R: Read>(
    pool: &SqlitePool,
    bus: &EventBus,
    reader: R,
    request: &ImportRequest,
    on_progress: impl FnMut(f64),
) -> Result<Vec<ShotRecord>> {
    let table = csv_file::read_table(reader)?;
    vendors::check_format(request.vendor, &table.headers)?;

    let records = process_import(&table.rows, request)?;
    let written = db::shots::upload_batch(pool, bus, &records, on_progress).await?;

    info!(
        "Imported {} rows for owner {} (vendor {}, batch {})",
        written,
        request.owner_id,
        request.vendor,
        records.first().map(|r| r.batch_id.as_str()).unwrap_or("-")
    );

    Ok(records)
}
