//! Domain models: questions, archetypes, the answer union, catalogs, and
//! the records the store persists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-archetype point totals. Always carries every catalog archetype,
/// zero-initialized, so clients see a complete distribution.
pub type ScoreTally = BTreeMap<String, u32>;

/// Static quiz question. `scoring` maps answer keys to archetype ids and is
/// empty for the designated role/demographic question.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: u32,
  pub prompt: String,
  pub answers: BTreeMap<String, String>,
  #[serde(default)] pub scoring: BTreeMap<String, String>,
  #[serde(default)] pub role: bool,
}

/// Static archetype catalog entry. Declaration order in the catalog doubles
/// as the deterministic tie-break order during resolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Archetype {
  pub id: String,
  pub name: String,
  pub description: String,
  pub characteristics: Vec<String>,
  pub approach: String,
  pub risk: String,
  pub icon: String,
  pub color: String,
}

/// One submitted answer. Legacy clients send a bare key; multi-select clients
/// send one primary key plus up to two secondary keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
  Single(String),
  MultiSelect {
    #[serde(default)] primary: Option<String>,
    #[serde(default)] secondary: Vec<String>,
  },
}

impl AnswerValue {
  /// The primary selected key, regardless of wire shape.
  pub fn primary_key(&self) -> Option<&str> {
    match self {
      AnswerValue::Single(k) => Some(k.as_str()),
      AnswerValue::MultiSelect { primary, .. } => primary.as_deref(),
    }
  }
}

/// Immutable catalogs built once at startup and passed explicitly into the
/// scoring engine and query layer.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizCatalog {
  pub questions: Vec<Question>,
  pub archetypes: Vec<Archetype>,
  /// Fallback archetype id returned when no answer scored any points.
  pub default_archetype: String,
  /// Answer key -> role label for the role/demographic question.
  #[serde(default)] pub role_map: BTreeMap<String, String>,
}

impl QuizCatalog {
  pub fn question(&self, id: u32) -> Option<&Question> {
    self.questions.iter().find(|q| q.id == id)
  }

  pub fn archetype(&self, id: &str) -> Option<&Archetype> {
    self.archetypes.iter().find(|a| a.id == id)
  }

  /// A tally with every catalog archetype at zero points.
  pub fn zero_tally(&self) -> ScoreTally {
    self.archetypes.iter().map(|a| (a.id.clone(), 0)).collect()
  }

  /// Structural checks applied to any catalog before it is used. Guarantees
  /// the scoring engine can never emit an id absent from the archetype set.
  pub fn validate(&self) -> Result<(), String> {
    if self.archetypes.is_empty() {
      return Err("catalog has no archetypes".into());
    }
    if self.questions.is_empty() {
      return Err("catalog has no questions".into());
    }
    let mut seen_arch = std::collections::HashSet::new();
    for a in &self.archetypes {
      if !seen_arch.insert(a.id.as_str()) {
        return Err(format!("duplicate archetype id '{}'", a.id));
      }
    }
    let mut seen_q = std::collections::HashSet::new();
    for q in &self.questions {
      if !seen_q.insert(q.id) {
        return Err(format!("duplicate question id {}", q.id));
      }
      if q.role && !q.scoring.is_empty() {
        return Err(format!("role question {} must not carry a scoring table", q.id));
      }
      for (key, target) in &q.scoring {
        if !q.answers.contains_key(key) {
          return Err(format!("question {}: scoring key '{}' has no answer text", q.id, key));
        }
        if !seen_arch.contains(target.as_str()) {
          return Err(format!(
            "question {}: key '{}' scores unknown archetype '{}'",
            q.id, key, target
          ));
        }
      }
    }
    let role_count = self.questions.iter().filter(|q| q.role).count();
    if role_count != 1 {
      return Err(format!("expected exactly one role question, found {}", role_count));
    }
    if !seen_arch.contains(self.default_archetype.as_str()) {
      return Err(format!("default archetype '{}' not in catalog", self.default_archetype));
    }
    Ok(())
  }
}

/// Submission as handed to the store; server-assigned fields are filled in
/// by `record`.
#[derive(Clone, Debug)]
pub struct NewSubmission {
  pub primary_archetype: String,
  pub secondary_archetype: Option<String>,
  pub archetype_name: String,
  pub scores: ScoreTally,
  pub responses: serde_json::Value,
  pub completion_time: Option<f64>,
  pub role_demographic: Option<String>,
  pub user_agent: String,
  pub ip_address: String,
}

/// Persisted submission row. Created exactly once, immutable thereafter.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionRecord {
  pub session_id: String,
  pub primary_archetype: String,
  pub secondary_archetype: Option<String>,
  pub archetype_name: String,
  pub scores: ScoreTally,
  pub responses: serde_json::Value,
  pub completion_time: Option<f64>,
  pub role_demographic: Option<String>,
  pub user_agent: String,
  pub ip_address: String,
  pub completed_at: DateTime<Utc>,
}

/// Analytics event to append. Best-effort side channel.
#[derive(Clone, Debug)]
pub struct NewEvent {
  pub event_type: String,
  pub session_id: Option<String>,
  pub data: Option<serde_json::Value>,
  pub user_agent: String,
  pub ip_address: String,
}

/// One archetype's slice of the distribution, in catalog order.
#[derive(Clone, Debug, Serialize)]
pub struct ArchetypeCount {
  pub archetype: String,
  pub name: String,
  pub count: u64,
  pub percentage: f64,
}

/// On-demand summary over the results table. No caching layer; every field
/// is an independent read against the same point-in-time snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct QuizStats {
  pub total_submissions: u64,
  pub archetype_distribution: Vec<ArchetypeCount>,
  pub last_7_days: u64,
  /// Calendar-day (UTC, `YYYY-MM-DD`) buckets over the last 30 days.
  pub daily_submissions: BTreeMap<String, u64>,
  /// Average self-reported completion time in minutes; absent when no
  /// submission reported one.
  pub average_completion_minutes: Option<f64>,
  pub role_distribution: BTreeMap<String, u64>,
}
