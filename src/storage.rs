//! SQLite-backed persistence: the immutable submission table and the
//! append-only analytics event log, plus the on-demand summary queries.
//!
//! Timestamps are stored as RFC 3339 UTC strings (`...Z`, whole seconds),
//! which compare lexicographically, so range filters use plain string
//! comparison and day buckets are a substring of the column.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, Duration, SecondsFormat, Timelike, Utc};
use rusqlite::{params, Connection};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    ArchetypeCount, NewEvent, NewSubmission, QuizCatalog, QuizStats, SubmissionRecord,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no submission found for session {0}")]
    NotFound(String),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("timestamp parse error: {0}")]
    Timestamp(String),
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS results (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT UNIQUE NOT NULL,
        primary_archetype TEXT NOT NULL,
        secondary_archetype TEXT,
        archetype_name TEXT NOT NULL,
        all_scores TEXT NOT NULL,
        responses TEXT NOT NULL,
        completion_time REAL,
        role_demographic TEXT,
        user_agent TEXT,
        ip_address TEXT,
        completed_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_type TEXT NOT NULL,
        session_id TEXT,
        event_data TEXT,
        ip_address TEXT,
        user_agent TEXT,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_results_archetype ON results(primary_archetype);
    CREATE INDEX IF NOT EXISTS idx_results_completed ON results(completed_at);
    CREATE INDEX IF NOT EXISTS idx_analytics_event ON analytics(event_type);
    CREATE INDEX IF NOT EXISTS idx_analytics_created ON analytics(created_at);
";

/// Submission + analytics store. The only mutations are single-row inserts,
/// so a mutex around the connection is the whole locking story.
pub struct SubmissionStore {
    db: Mutex<Connection>,
}

impl SubmissionStore {
    /// Open (or create) the database file, enable WAL, and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Connection::open(path)?;
        // WAL for concurrent readers while an insert is in flight.
        db.execute_batch("PRAGMA journal_mode=WAL;")?;
        db.execute_batch(SCHEMA)?;
        info!(target: "storage", path = %path.display(), "submission store opened");
        Ok(Self { db: Mutex::new(db) })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let db = Connection::open_in_memory()?;
        db.execute_batch(SCHEMA)?;
        Ok(Self { db: Mutex::new(db) })
    }

    /// Persist one submission as a single atomic insert and return the full
    /// record with its server-assigned session id and timestamp.
    pub async fn record(&self, new: NewSubmission) -> Result<SubmissionRecord, StoreError> {
        let session_id = Uuid::new_v4().to_string();
        // Whole-second precision: the returned record must equal what a later
        // fetch reads back out of the TEXT column.
        let now = Utc::now();
        let completed_at = now.with_nanosecond(0).unwrap_or(now);
        let scores_json = serde_json::to_string(&new.scores)?;
        let responses_json = serde_json::to_string(&new.responses)?;

        let db = self.db.lock().await;
        db.prepare_cached(
            "INSERT INTO results (session_id, primary_archetype, secondary_archetype,
                 archetype_name, all_scores, responses, completion_time, role_demographic,
                 user_agent, ip_address, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?
        .execute(params![
            session_id,
            new.primary_archetype,
            new.secondary_archetype,
            new.archetype_name,
            scores_json,
            responses_json,
            new.completion_time,
            new.role_demographic,
            new.user_agent,
            new.ip_address,
            completed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ])?;
        debug!(target: "storage", %session_id, archetype = %new.primary_archetype, "submission recorded");

        Ok(SubmissionRecord {
            session_id,
            primary_archetype: new.primary_archetype,
            secondary_archetype: new.secondary_archetype,
            archetype_name: new.archetype_name,
            scores: new.scores,
            responses: new.responses,
            completion_time: new.completion_time,
            role_demographic: new.role_demographic,
            user_agent: new.user_agent,
            ip_address: new.ip_address,
            completed_at,
        })
    }

    /// Fetch a submission verbatim by session id.
    pub async fn fetch(&self, session_id: &str) -> Result<SubmissionRecord, StoreError> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare_cached(
            "SELECT session_id, primary_archetype, secondary_archetype, archetype_name,
                    all_scores, responses, completion_time, role_demographic,
                    user_agent, ip_address, completed_at
             FROM results WHERE session_id = ?1",
        )?;

        let row = stmt.query_row([session_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<f64>>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, Option<String>>(8)?,
                row.get::<_, Option<String>>(9)?,
                row.get::<_, String>(10)?,
            ))
        });
        let (sid, primary, secondary, name, scores_json, responses_json, completion, role, ua, ip, at) =
            match row {
                Ok(r) => r,
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Err(StoreError::NotFound(session_id.to_string()))
                }
                Err(e) => return Err(e.into()),
            };

        Ok(SubmissionRecord {
            session_id: sid,
            primary_archetype: primary,
            secondary_archetype: secondary,
            archetype_name: name,
            scores: serde_json::from_str(&scores_json)?,
            responses: serde_json::from_str(&responses_json)?,
            completion_time: completion,
            role_demographic: role,
            user_agent: ua.unwrap_or_default(),
            ip_address: ip.unwrap_or_default(),
            completed_at: parse_stored_timestamp(&at)?,
        })
    }

    /// Append one analytics event. Callers on the quiz path treat a failure
    /// here as non-fatal; the error is returned for logging only.
    pub async fn log_event(&self, event: NewEvent) -> Result<(), StoreError> {
        let data_json = match &event.data {
            Some(v) => Some(serde_json::to_string(v)?),
            None => None,
        };
        let db = self.db.lock().await;
        db.prepare_cached(
            "INSERT INTO analytics (event_type, session_id, event_data, ip_address, user_agent, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?
        .execute(params![
            event.event_type,
            event.session_id,
            data_json,
            event.ip_address,
            event.user_agent,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ])?;
        Ok(())
    }

    /// Row count of the results table; used by the health endpoint.
    pub async fn total_results(&self) -> Result<u64, StoreError> {
        let db = self.db.lock().await;
        let total: u64 = db.query_row("SELECT COUNT(*) FROM results", [], |r| r.get(0))?;
        Ok(total)
    }

    /// The on-demand summary described by the stats endpoint. Each query is
    /// independent; no isolation beyond SQLite's own read consistency.
    pub async fn stats(&self, catalog: &QuizCatalog) -> Result<QuizStats, StoreError> {
        let now = Utc::now();
        let cutoff_7 = rfc3339(now - Duration::days(7));
        let cutoff_30 = rfc3339(now - Duration::days(30));

        let db = self.db.lock().await;

        let total: u64 = db.query_row("SELECT COUNT(*) FROM results", [], |r| r.get(0))?;

        let mut by_archetype: HashMap<String, u64> = HashMap::new();
        {
            let mut stmt = db.prepare_cached(
                "SELECT primary_archetype, COUNT(*) FROM results GROUP BY primary_archetype",
            )?;
            let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, u64>(1)?)))?;
            for row in rows {
                let (id, count) = row?;
                by_archetype.insert(id, count);
            }
        }
        // Catalog order, zero-count entries included; percentage is 0.0 when
        // the table is empty rather than a division error.
        let archetype_distribution = catalog
            .archetypes
            .iter()
            .map(|a| {
                let count = by_archetype.get(&a.id).copied().unwrap_or(0);
                let percentage = if total == 0 {
                    0.0
                } else {
                    (count as f64 * 100.0 / total as f64 * 10.0).round() / 10.0
                };
                ArchetypeCount {
                    archetype: a.id.clone(),
                    name: a.name.clone(),
                    count,
                    percentage,
                }
            })
            .collect();

        let last_7_days: u64 = db.query_row(
            "SELECT COUNT(*) FROM results WHERE completed_at >= ?1",
            [&cutoff_7],
            |r| r.get(0),
        )?;

        let mut daily_submissions = BTreeMap::new();
        {
            let mut stmt = db.prepare_cached(
                "SELECT substr(completed_at, 1, 10) AS day, COUNT(*)
                 FROM results WHERE completed_at >= ?1
                 GROUP BY day ORDER BY day",
            )?;
            let rows =
                stmt.query_map([&cutoff_30], |r| Ok((r.get::<_, String>(0)?, r.get::<_, u64>(1)?)))?;
            for row in rows {
                let (day, count) = row?;
                daily_submissions.insert(day, count);
            }
        }

        // AVG over zero non-null rows is NULL, which maps cleanly to None.
        let average_completion_minutes: Option<f64> = db.query_row(
            "SELECT AVG(completion_time) FROM results WHERE completion_time IS NOT NULL",
            [],
            |r| r.get(0),
        )?;

        let mut role_distribution = BTreeMap::new();
        {
            let mut stmt = db.prepare_cached(
                "SELECT role_demographic, COUNT(*) FROM results
                 WHERE role_demographic IS NOT NULL GROUP BY role_demographic",
            )?;
            let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, u64>(1)?)))?;
            for row in rows {
                let (role, count) = row?;
                role_distribution.insert(role, count);
            }
        }

        Ok(QuizStats {
            total_submissions: total,
            archetype_distribution,
            last_7_days,
            daily_submissions,
            average_completion_minutes,
            role_distribution,
        })
    }
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_stored_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Timestamp(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use serde_json::json;

    fn submission(primary: &str, name: &str) -> NewSubmission {
        NewSubmission {
            primary_archetype: primary.to_string(),
            secondary_archetype: None,
            archetype_name: name.to_string(),
            scores: builtin_catalog().zero_tally(),
            responses: json!({"1": "A"}),
            completion_time: None,
            role_demographic: None,
            user_agent: "test-agent".to_string(),
            ip_address: "127.0.0.1".to_string(),
        }
    }

    #[tokio::test]
    async fn record_then_fetch_round_trips_every_field() {
        let store = SubmissionStore::open_in_memory().expect("store");
        let mut new = submission("egalitarian", "The Egalitarian");
        new.secondary_archetype = Some("innovator".to_string());
        new.scores.insert("egalitarian".to_string(), 4);
        new.scores.insert("innovator".to_string(), 3);
        new.responses = json!({"2": "A", "3": {"primary": "G", "secondary": ["F"]}});
        new.completion_time = Some(2.5);
        new.role_demographic = Some("manager".to_string());

        let rec = store.record(new.clone()).await.expect("record");
        assert!(!rec.session_id.is_empty());

        let fetched = store.fetch(&rec.session_id).await.expect("fetch");
        assert_eq!(fetched.session_id, rec.session_id);
        assert_eq!(fetched.primary_archetype, new.primary_archetype);
        assert_eq!(fetched.secondary_archetype, new.secondary_archetype);
        assert_eq!(fetched.archetype_name, new.archetype_name);
        assert_eq!(fetched.scores, new.scores);
        assert_eq!(fetched.responses, new.responses);
        assert_eq!(fetched.completion_time, new.completion_time);
        assert_eq!(fetched.role_demographic, new.role_demographic);
        assert_eq!(fetched.user_agent, new.user_agent);
        assert_eq!(fetched.ip_address, new.ip_address);
        assert_eq!(fetched.completed_at, rec.completed_at);
    }

    #[tokio::test]
    async fn fetch_unknown_session_is_not_found() {
        let store = SubmissionStore::open_in_memory().expect("store");
        let err = store.fetch("no-such-session").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_records_produce_independent_rows() {
        let store = std::sync::Arc::new(SubmissionStore::open_in_memory().expect("store"));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.record(submission("innovator", "The Innovator")).await
            }));
        }
        let mut ids = std::collections::HashSet::new();
        for h in handles {
            let rec = h.await.expect("join").expect("record");
            ids.insert(rec.session_id);
        }
        assert_eq!(ids.len(), 8);
        assert_eq!(store.total_results().await.expect("count"), 8);
    }

    #[tokio::test]
    async fn stats_over_empty_store_are_all_zero() {
        let store = SubmissionStore::open_in_memory().expect("store");
        let cat = builtin_catalog();
        let stats = store.stats(&cat).await.expect("stats");
        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.last_7_days, 0);
        assert!(stats.daily_submissions.is_empty());
        assert!(stats.average_completion_minutes.is_none());
        assert!(stats.role_distribution.is_empty());
        assert_eq!(stats.archetype_distribution.len(), cat.archetypes.len());
        assert!(stats.archetype_distribution.iter().all(|s| s.count == 0));
        assert!(stats.archetype_distribution.iter().all(|s| s.percentage == 0.0));
    }

    #[tokio::test]
    async fn stats_aggregate_counts_percentages_and_roles() {
        let store = SubmissionStore::open_in_memory().expect("store");
        let cat = builtin_catalog();

        let mut a = submission("innovator", "The Innovator");
        a.completion_time = Some(2.0);
        a.role_demographic = Some("manager".to_string());
        store.record(a).await.expect("record");

        let mut b = submission("innovator", "The Innovator");
        b.completion_time = Some(4.0);
        store.record(b).await.expect("record");

        let c = submission("guardian", "The Guardian"); // no completion time
        store.record(c).await.expect("record");

        let stats = store.stats(&cat).await.expect("stats");
        assert_eq!(stats.total_submissions, 3);
        assert_eq!(stats.last_7_days, 3);

        let innovator = stats
            .archetype_distribution
            .iter()
            .find(|s| s.archetype == "innovator")
            .expect("innovator slice");
        assert_eq!(innovator.count, 2);
        assert_eq!(innovator.percentage, 66.7);

        let guardian = stats
            .archetype_distribution
            .iter()
            .find(|s| s.archetype == "guardian")
            .expect("guardian slice");
        assert_eq!(guardian.count, 1);
        assert_eq!(guardian.percentage, 33.3);

        // Nulls excluded from the average, not treated as zero.
        assert_eq!(stats.average_completion_minutes, Some(3.0));
        assert_eq!(stats.role_distribution.get("manager"), Some(&1));
        assert_eq!(stats.daily_submissions.values().sum::<u64>(), 3);
    }

    #[tokio::test]
    async fn analytics_events_append_without_a_submission() {
        let store = SubmissionStore::open_in_memory().expect("store");
        store
            .log_event(NewEvent {
                event_type: "page_view".to_string(),
                session_id: None,
                data: Some(json!({"page": "home"})),
                user_agent: String::new(),
                ip_address: String::new(),
            })
            .await
            .expect("event");
        store
            .log_event(NewEvent {
                event_type: "quiz_started".to_string(),
                session_id: Some("abc".to_string()),
                data: None,
                user_agent: String::new(),
                ip_address: String::new(),
            })
            .await
            .expect("event");
        // Events never create result rows.
        assert_eq!(store.total_results().await.expect("count"), 0);
    }
}
