//! The scoring engine: a pure tally over submitted answers plus the
//! primary/secondary resolver.
//!
//! Permissiveness is deliberate and mirrors product behavior: unknown
//! question ids, unmapped answer keys, and surplus secondary keys are all
//! silently skipped — never an error. Everything here is a pure function of
//! its inputs and safe to call concurrently.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{AnswerValue, Question, QuizCatalog, ScoreTally};

/// A primary (or legacy single) choice is worth three secondaries.
const PRIMARY_POINTS: u32 = 3;
const SECONDARY_POINTS: u32 = 1;
/// Only the first two secondary keys are honored; extras are ignored.
const MAX_SECONDARY_KEYS: usize = 2;

/// A runner-up becomes the secondary archetype only with at least this many
/// points. Policy constant; changing it changes the product.
pub const SECONDARY_MIN_POINTS: u32 = 4;
/// ...and only when it trails the primary by at most this many points.
pub const SECONDARY_MAX_GAP: u32 = 3;

/// Tally points for every scorable response and extract the role
/// classification from the designated role question, if answered.
pub fn score(
  responses: &HashMap<String, AnswerValue>,
  catalog: &QuizCatalog,
) -> (ScoreTally, Option<String>) {
  let mut tally = catalog.zero_tally();
  let mut role = None;

  for (qid_raw, answer) in responses {
    let Ok(qid) = qid_raw.parse::<u32>() else {
      debug!(target: "scoring", question = %qid_raw, "non-numeric question id skipped");
      continue;
    };
    let Some(q) = catalog.question(qid) else {
      debug!(target: "scoring", question = qid, "unknown question id skipped");
      continue;
    };

    if q.role {
      role = answer
        .primary_key()
        .and_then(|k| catalog.role_map.get(k))
        .cloned();
      continue;
    }
    if q.scoring.is_empty() {
      continue;
    }

    match answer {
      AnswerValue::Single(key) => award(&mut tally, q, key, PRIMARY_POINTS),
      AnswerValue::MultiSelect { primary, secondary } => {
        if let Some(key) = primary {
          award(&mut tally, q, key, PRIMARY_POINTS);
        }
        for key in secondary.iter().take(MAX_SECONDARY_KEYS) {
          award(&mut tally, q, key, SECONDARY_POINTS);
        }
      }
    }
  }

  (tally, role)
}

fn award(tally: &mut ScoreTally, q: &Question, key: &str, points: u32) {
  // Keys absent from the scoring table contribute nothing.
  if let Some(target) = q.scoring.get(key) {
    if let Some(slot) = tally.get_mut(target) {
      *slot += points;
    }
  }
}

/// Rank the tally and resolve (primary, optional secondary).
///
/// Ties break by catalog declaration order: the ranking walks archetypes in
/// catalog order and uses a stable sort, so among equal totals the earlier
/// catalog entry wins. An all-zero tally resolves to the catalog's default
/// archetype with no secondary.
pub fn resolve(tally: &ScoreTally, catalog: &QuizCatalog) -> (String, Option<String>) {
  let mut ranked: Vec<(&str, u32)> = catalog
    .archetypes
    .iter()
    .map(|a| (a.id.as_str(), tally.get(&a.id).copied().unwrap_or(0)))
    .collect();
  ranked.sort_by(|a, b| b.1.cmp(&a.1));

  let Some(&(top_id, top_points)) = ranked.first() else {
    // Catalogs are validated non-empty; this is unreachable in practice.
    return (catalog.default_archetype.clone(), None);
  };
  if top_points == 0 {
    return (catalog.default_archetype.clone(), None);
  }

  let secondary = ranked
    .get(1)
    .filter(|(_, points)| {
      *points >= SECONDARY_MIN_POINTS && top_points - points <= SECONDARY_MAX_GAP
    })
    .map(|(id, _)| id.to_string());

  (top_id.to_string(), secondary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::builtin_catalog;

  fn single(key: &str) -> AnswerValue {
    AnswerValue::Single(key.to_string())
  }

  fn multi(primary: Option<&str>, secondary: &[&str]) -> AnswerValue {
    AnswerValue::MultiSelect {
      primary: primary.map(|s| s.to_string()),
      secondary: secondary.iter().map(|s| s.to_string()).collect(),
    }
  }

  fn responses(entries: Vec<(&str, AnswerValue)>) -> HashMap<String, AnswerValue> {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
  }

  #[test]
  fn empty_responses_resolve_to_default_with_zero_tally() {
    let cat = builtin_catalog();
    let (tally, role) = score(&HashMap::new(), &cat);
    assert!(tally.values().all(|&p| p == 0));
    assert_eq!(tally.len(), cat.archetypes.len());
    assert!(role.is_none());

    let (primary, secondary) = resolve(&tally, &cat);
    assert_eq!(primary, "pragmatist");
    assert!(secondary.is_none());
  }

  #[test]
  fn single_answer_counts_as_primary_choice() {
    let cat = builtin_catalog();
    let (tally, _) = score(&responses(vec![("2", single("A"))]), &cat);
    assert_eq!(tally["innovator"], 3);
    assert_eq!(tally.values().sum::<u32>(), 3);
  }

  #[test]
  fn weighted_scenario_matches_hand_computation() {
    // Q2 "A" -> innovator (3). Q3 primary "G" -> egalitarian (3),
    // secondary "F" -> egalitarian (1). Runner-up innovator sits below the
    // 4-point threshold, so no secondary archetype.
    let cat = builtin_catalog();
    let resp = responses(vec![
      ("2", single("A")),
      ("3", multi(Some("G"), &["F"])),
    ]);
    let (tally, role) = score(&resp, &cat);
    assert_eq!(tally["innovator"], 3);
    assert_eq!(tally["egalitarian"], 4);
    assert_eq!(tally.values().sum::<u32>(), 7);
    assert!(role.is_none());

    let (primary, secondary) = resolve(&tally, &cat);
    assert_eq!(primary, "egalitarian");
    assert!(secondary.is_none());
  }

  #[test]
  fn point_sum_is_three_per_primary_plus_one_per_secondary() {
    let cat = builtin_catalog();
    let resp = responses(vec![
      ("1", multi(Some("A"), &["B", "C"])), // 3 + 1 + 1
      ("4", single("G")),                   // 3
      ("5", multi(None, &["D"])),           // 1
    ]);
    let (tally, _) = score(&resp, &cat);
    assert_eq!(tally.values().sum::<u32>(), 3 + 1 + 1 + 3 + 1);
  }

  #[test]
  fn surplus_secondary_keys_are_ignored() {
    let cat = builtin_catalog();
    let resp = responses(vec![("1", multi(None, &["B", "C", "D", "E"]))]);
    let (tally, _) = score(&resp, &cat);
    assert_eq!(tally.values().sum::<u32>(), 2);
  }

  #[test]
  fn unknown_questions_and_unmapped_keys_are_silent_noops() {
    let cat = builtin_catalog();
    let resp = responses(vec![
      ("99", single("A")),                 // unknown question id
      ("not-a-number", single("A")),       // unparseable id
      ("1", single("Z")),                  // key not in scoring table
      ("2", multi(Some("Z"), &["Y", "A"])), // only the "A" secondary maps
    ]);
    let (tally, _) = score(&resp, &cat);
    assert_eq!(tally.values().sum::<u32>(), 1);
  }

  #[test]
  fn role_question_classifies_without_scoring() {
    let cat = builtin_catalog();
    let resp = responses(vec![("11", single("B"))]);
    let (tally, role) = score(&resp, &cat);
    assert!(tally.values().all(|&p| p == 0));
    assert_eq!(role.as_deref(), Some("manager"));

    // Structured role answers work the same way via the primary key.
    let resp = responses(vec![("11", multi(Some("D"), &[]))]);
    let (_, role) = score(&resp, &cat);
    assert_eq!(role.as_deref(), Some("technical"));

    // Unmapped role keys yield no classification.
    let resp = responses(vec![("11", single("Z"))]);
    let (_, role) = score(&resp, &cat);
    assert!(role.is_none());
  }

  #[test]
  fn secondary_present_exactly_at_thresholds() {
    let cat = builtin_catalog();
    let mut tally = cat.zero_tally();
    tally.insert("innovator".into(), 7);
    tally.insert("guardian".into(), 4); // >= 4 points, gap == 3
    let (primary, secondary) = resolve(&tally, &cat);
    assert_eq!(primary, "innovator");
    assert_eq!(secondary.as_deref(), Some("guardian"));
  }

  #[test]
  fn secondary_absent_below_point_threshold() {
    let cat = builtin_catalog();
    let mut tally = cat.zero_tally();
    tally.insert("innovator".into(), 6);
    tally.insert("guardian".into(), 3); // below the 4-point floor
    let (_, secondary) = resolve(&tally, &cat);
    assert!(secondary.is_none());
  }

  #[test]
  fn secondary_absent_beyond_gap_threshold() {
    let cat = builtin_catalog();
    let mut tally = cat.zero_tally();
    tally.insert("innovator".into(), 9);
    tally.insert("guardian".into(), 5); // gap == 4, one past the limit
    let (_, secondary) = resolve(&tally, &cat);
    assert!(secondary.is_none());
  }

  #[test]
  fn equal_totals_break_ties_by_catalog_order() {
    let cat = builtin_catalog();
    let mut tally = cat.zero_tally();
    // guardian precedes skeptic in the catalog declaration order.
    tally.insert("skeptic".into(), 6);
    tally.insert("guardian".into(), 6);
    let (primary, secondary) = resolve(&tally, &cat);
    assert_eq!(primary, "guardian");
    assert_eq!(secondary.as_deref(), Some("skeptic"));
  }
}
