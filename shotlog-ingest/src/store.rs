//! Live store streams
//!
//! Each `stream_*` call delivers an initial snapshot to its callback, then
//! a full recomputed snapshot every time a store event for that owner
//! lands on the bus. Snapshots are whole-world recomputes, not deltas, so
//! a lagged receiver simply resyncs on the next event it sees.
//!
//! Every stream returns a `Subscription` handle owning the spawned task;
//! `close()` (or dropping the handle) stops further callbacks.

use crate::db::shots;
use crate::models::{SessionSummary, ShotRecord};
use shotlog_common::{EventBus, StoreEvent};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Handle for a live stream
///
/// The subscription stays active until `close()` is called or the handle
/// is dropped.
pub struct Subscription {
    id: Uuid,
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop the stream; no further callbacks fire after this returns
    pub fn close(self) {
        self.task.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Group an owner's records into per-session summaries, newest first
///
/// Session fields come from the first record seen for each batch; empty
/// notes read as "No notes".
pub fn group_sessions(records: &[ShotRecord]) -> Vec<SessionSummary> {
    let mut batches: HashMap<&str, SessionSummary> = HashMap::new();

    for record in records {
        let entry = batches
            .entry(record.batch_id.as_str())
            .or_insert_with(|| SessionSummary {
                batch_id: record.batch_id.clone(),
                session_name: record.session_name.clone(),
                notes: if record.notes.trim().is_empty() {
                    "No notes".to_string()
                } else {
                    record.notes.clone()
                },
                uploaded_at: record.uploaded_at,
                shot_count: 0,
                vendor: record.vendor.as_str().to_string(),
            });
        entry.shot_count += 1;
    }

    let mut sessions: Vec<SessionSummary> = batches.into_values().collect();
    sessions.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| b.batch_id.cmp(&a.batch_id))
    });
    sessions
}

/// Group records by canonical club name
pub fn group_by_club(records: Vec<ShotRecord>) -> BTreeMap<String, Vec<ShotRecord>> {
    let mut clubs: BTreeMap<String, Vec<ShotRecord>> = BTreeMap::new();
    for record in records {
        clubs.entry(record.club.clone()).or_default().push(record);
    }
    clubs
}

/// Stream an owner's session list
pub fn stream_sessions(
    pool: SqlitePool,
    bus: &EventBus,
    owner_id: impl Into<String>,
    mut callback: impl FnMut(Vec<SessionSummary>) + Send + 'static,
) -> Subscription {
    let owner_id = owner_id.into();
    let mut rx = bus.subscribe();

    spawn_stream(move || async move {
        loop {
            let snapshot = match shots::fetch_owner_records(&pool, &owner_id).await {
                Ok(records) => group_sessions(&records),
                Err(e) => {
                    warn!("Session stream query failed for owner {}: {}", owner_id, e);
                    Vec::new()
                }
            };
            callback(snapshot);

            if !wait_for_owner_event(&mut rx, &owner_id).await {
                return;
            }
        }
    })
}

/// Stream the records of one session
pub fn stream_session_records(
    pool: SqlitePool,
    bus: &EventBus,
    owner_id: impl Into<String>,
    batch_id: impl Into<String>,
    mut callback: impl FnMut(Vec<ShotRecord>) + Send + 'static,
) -> Subscription {
    let owner_id = owner_id.into();
    let batch_id = batch_id.into();
    let mut rx = bus.subscribe();

    spawn_stream(move || async move {
        loop {
            let snapshot = match shots::fetch_session_records(&pool, &owner_id, &batch_id).await {
                Ok(records) => records,
                Err(e) => {
                    warn!("Session record stream query failed for batch {}: {}", batch_id, e);
                    Vec::new()
                }
            };
            callback(snapshot);

            if !wait_for_owner_event(&mut rx, &owner_id).await {
                return;
            }
        }
    })
}

/// Stream an owner's shots across all sessions, grouped by club
pub fn stream_club_history(
    pool: SqlitePool,
    bus: &EventBus,
    owner_id: impl Into<String>,
    mut callback: impl FnMut(BTreeMap<String, Vec<ShotRecord>>) + Send + 'static,
) -> Subscription {
    let owner_id = owner_id.into();
    let mut rx = bus.subscribe();

    spawn_stream(move || async move {
        loop {
            let snapshot = match shots::fetch_owner_records(&pool, &owner_id).await {
                Ok(records) => group_by_club(records),
                Err(e) => {
                    warn!("Club history stream query failed for owner {}: {}", owner_id, e);
                    BTreeMap::new()
                }
            };
            callback(snapshot);

            if !wait_for_owner_event(&mut rx, &owner_id).await {
                return;
            }
        }
    })
}

fn spawn_stream<F, Fut>(body: F) -> Subscription
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let id = Uuid::new_v4();
    debug!("Opening store subscription {}", id);
    Subscription {
        id,
        task: tokio::spawn(body()),
    }
}

/// Block until the next event for this owner
///
/// Returns false when the bus is gone and the stream should end. A lagged
/// receiver counts as a wake-up: the snapshot recompute absorbs whatever
/// events were missed.
async fn wait_for_owner_event(rx: &mut broadcast::Receiver<StoreEvent>, owner_id: &str) -> bool {
    loop {
        match rx.recv().await {
            Ok(event) if event.owner_id() == owner_id => return true,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                debug!("Store subscription lagged by {} events, resyncing", skipped);
                return true;
            }
            Err(RecvError::Closed) => return false,
        }
    }
}
