//! Shot record database operations
//!
//! All writes and reads are scoped to `(owner_id, batch_id)` or to an
//! owner. Rows are decoded defensively: club names are re-normalized and
//! upload timestamps go through the polymorphic decoder, so records
//! written before a normalization rule existed still read cleanly.

use crate::error::{IngestError, Result as IngestResult};
use crate::models::{ShotRecord, Vendor};
use crate::normalize;
use shotlog_common::{time, Error, EventBus, Result, StoreEvent};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

/// Validate a batch before any write
///
/// Every record needs a non-empty club and a present carry distance. A
/// genuine zero carry is present and passes; a file whose vendor export
/// had no carry column at all fails here. Any failure rejects the whole
/// batch.
fn validate_batch(records: &[ShotRecord]) -> IngestResult<()> {
    for record in records {
        if record.club.trim().is_empty() {
            return Err(IngestError::MissingRequiredField {
                row_index: record.row_index,
                field: "club",
            });
        }
        if record.carry_distance.is_none() {
            return Err(IngestError::MissingRequiredField {
                row_index: record.row_index,
                field: "carry_distance",
            });
        }
    }
    Ok(())
}

/// Write a batch of shot records
///
/// Inserts run sequentially inside one transaction so `on_progress` can
/// report accurate, non-decreasing percentages; it reaches 100 only when
/// every row is in. On the first failed insert the transaction rolls back
/// and nothing is persisted. Emits `BatchUploaded` after commit.
pub async fn upload_batch(
    pool: &SqlitePool,
    bus: &EventBus,
    records: &[ShotRecord],
    mut on_progress: impl FnMut(f64),
) -> IngestResult<usize> {
    if records.is_empty() {
        return Err(IngestError::EmptyFile);
    }

    validate_batch(records)?;

    let total = records.len();
    let mut tx = pool.begin().await?;

    for (i, record) in records.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO shots (
                owner_id, batch_id, vendor, row_index, club,
                ball_speed, club_speed, vla, peak_height, descent_angle,
                spin_rate, carry_distance, side_total, total_distance,
                session_name, notes, elevation, uploaded_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.owner_id)
        .bind(&record.batch_id)
        .bind(record.vendor.as_str())
        .bind(record.row_index)
        .bind(&record.club)
        .bind(record.ball_speed)
        .bind(record.club_speed)
        .bind(record.vla)
        .bind(record.peak_height)
        .bind(record.descent_angle)
        .bind(record.spin_rate)
        .bind(record.carry_distance)
        .bind(record.side_total)
        .bind(record.total_distance)
        .bind(&record.session_name)
        .bind(&record.notes)
        .bind(record.elevation)
        .bind(record.uploaded_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        on_progress(((i + 1) as f64 / total as f64) * 100.0);
    }

    tx.commit().await?;

    let first = &records[0];
    info!(
        "Uploaded batch {} ({} shots) for owner {}",
        first.batch_id, total, first.owner_id
    );

    // Notification only; no subscribers is fine
    let _ = bus.emit(StoreEvent::BatchUploaded {
        owner_id: first.owner_id.clone(),
        batch_id: first.batch_id.clone(),
        shot_count: total,
        timestamp: time::now(),
    });

    Ok(total)
}

/// Delete all records of one batch
///
/// Scoped to both owner and batch id; other batches of the same owner are
/// untouched. Idempotent: deleting an already-empty batch returns 0.
pub async fn delete_batch(
    pool: &SqlitePool,
    bus: &EventBus,
    owner_id: &str,
    batch_id: &str,
) -> Result<u64> {
    let result = sqlx::query("DELETE FROM shots WHERE owner_id = ? AND batch_id = ?")
        .bind(owner_id)
        .bind(batch_id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected();
    info!("Deleted batch {} for owner {} ({} shots)", batch_id, owner_id, deleted);

    if deleted > 0 {
        let _ = bus.emit(StoreEvent::BatchDeleted {
            owner_id: owner_id.to_string(),
            batch_id: batch_id.to_string(),
            deleted,
            timestamp: time::now(),
        });
    }

    Ok(deleted)
}

/// All records for an owner, newest upload first
pub async fn fetch_owner_records(pool: &SqlitePool, owner_id: &str) -> Result<Vec<ShotRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT owner_id, batch_id, vendor, row_index, club,
               ball_speed, club_speed, vla, peak_height, descent_angle,
               spin_rate, carry_distance, side_total, total_distance,
               session_name, notes, elevation, uploaded_at
        FROM shots
        WHERE owner_id = ?
        ORDER BY uploaded_at DESC, batch_id DESC, row_index ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    debug!("Fetched {} records for owner {}", rows.len(), owner_id);
    rows.iter().map(shot_from_row).collect()
}

/// All records of one session, in source order
pub async fn fetch_session_records(
    pool: &SqlitePool,
    owner_id: &str,
    batch_id: &str,
) -> Result<Vec<ShotRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT owner_id, batch_id, vendor, row_index, club,
               ball_speed, club_speed, vla, peak_height, descent_angle,
               spin_rate, carry_distance, side_total, total_distance,
               session_name, notes, elevation, uploaded_at
        FROM shots
        WHERE owner_id = ? AND batch_id = ?
        ORDER BY row_index ASC
        "#,
    )
    .bind(owner_id)
    .bind(batch_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(shot_from_row).collect()
}

/// Metric values written by this build are finite, but rows can predate it
fn clean_metric(value: Option<f64>) -> Option<f64> {
    value.map(|v| if v.is_finite() { v } else { 0.0 })
}

fn shot_from_row(row: &SqliteRow) -> Result<ShotRecord> {
    let vendor_raw: String = row.get("vendor");
    let vendor = vendor_raw
        .parse::<Vendor>()
        .map_err(|_| Error::Internal(format!("Unknown vendor in store: {}", vendor_raw)))?;

    let club_raw: String = row.get("club");
    let uploaded_raw: String = row.get("uploaded_at");

    Ok(ShotRecord {
        owner_id: row.get("owner_id"),
        batch_id: row.get("batch_id"),
        vendor,
        row_index: row.get("row_index"),
        club: normalize::normalize_club_name(&club_raw),
        ball_speed: clean_metric(row.get("ball_speed")),
        club_speed: clean_metric(row.get("club_speed")),
        vla: clean_metric(row.get("vla")),
        peak_height: clean_metric(row.get("peak_height")),
        descent_angle: clean_metric(row.get("descent_angle")),
        spin_rate: clean_metric(row.get("spin_rate")),
        carry_distance: clean_metric(row.get("carry_distance")),
        side_total: clean_metric(row.get("side_total")),
        total_distance: clean_metric(row.get("total_distance")),
        session_name: row.get("session_name"),
        notes: row.get("notes"),
        elevation: row.get("elevation"),
        uploaded_at: time::parse_uploaded_at(&uploaded_raw),
    })
}
