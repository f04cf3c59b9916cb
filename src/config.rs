//! Catalog configuration loading from TOML.
//!
//! The file replaces the whole built-in catalog: questions, archetypes,
//! role map, and the default archetype. Schema mirrors `QuizCatalog`'s
//! serde shape, e.g.:
//!
//! ```toml
//! default_archetype = "pragmatist"
//!
//! [[archetypes]]
//! id = "pragmatist"
//! name = "The Pragmatist"
//! # ...
//!
//! [[questions]]
//! id = 1
//! prompt = "..."
//! [questions.answers]
//! A = "..."
//! [questions.scoring]
//! A = "pragmatist"
//! ```

use tracing::{error, info};

use crate::domain::QuizCatalog;

/// Attempt to load a catalog from QUIZ_CONFIG_PATH. On any IO, parsing, or
/// validation error, returns None and the caller falls back to the built-in
/// catalog.
pub fn load_catalog_from_env() -> Option<QuizCatalog> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  let raw = match std::fs::read_to_string(&path) {
    Ok(s) => s,
    Err(e) => {
      error!(target: "quiz_backend", %path, error = %e, "Failed to read catalog TOML file");
      return None;
    }
  };
  let catalog = match toml::from_str::<QuizCatalog>(&raw) {
    Ok(c) => c,
    Err(e) => {
      error!(target: "quiz_backend", %path, error = %e, "Failed to parse catalog TOML");
      return None;
    }
  };
  if let Err(e) = catalog.validate() {
    error!(target: "quiz_backend", %path, error = %e, "Catalog TOML failed validation");
    return None;
  }
  info!(
    target: "quiz_backend",
    %path,
    questions = catalog.questions.len(),
    archetypes = catalog.archetypes.len(),
    "Loaded catalog override (TOML)"
  );
  Some(catalog)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toml_catalog_round_trips_and_validates() {
    let raw = r##"
      default_archetype = "solo"

      [[archetypes]]
      id = "solo"
      name = "The Solo"
      description = "Only entry."
      characteristics = ["solitary"]
      approach = "n/a"
      risk = "n/a"
      icon = "x"
      color = "#000000"

      [[questions]]
      id = 1
      prompt = "Pick one."
      [questions.answers]
      A = "The only answer"
      [questions.scoring]
      A = "solo"

      [[questions]]
      id = 2
      prompt = "Your role?"
      role = true
      [questions.answers]
      A = "Whatever"

      [role_map]
      A = "other"
    "##;
    let catalog: QuizCatalog = toml::from_str(raw).expect("parse");
    catalog.validate().expect("validate");
    assert_eq!(catalog.questions.len(), 2);
    assert!(catalog.question(2).expect("q2").role);
  }

  #[test]
  fn validation_rejects_scoring_into_unknown_archetype() {
    let raw = r##"
      default_archetype = "solo"

      [[archetypes]]
      id = "solo"
      name = "The Solo"
      description = "Only entry."
      characteristics = []
      approach = "n/a"
      risk = "n/a"
      icon = "x"
      color = "#000000"

      [[questions]]
      id = 1
      prompt = "Pick one."
      [questions.answers]
      A = "The only answer"
      [questions.scoring]
      A = "ghost"

      [[questions]]
      id = 2
      prompt = "Your role?"
      role = true
      [questions.answers]
      A = "Whatever"
    "##;
    let catalog: QuizCatalog = toml::from_str(raw).expect("parse");
    let err = catalog.validate().unwrap_err();
    assert!(err.contains("ghost"), "unexpected error: {err}");
  }
}
