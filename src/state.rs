//! Application state: the immutable catalogs and the SQLite-backed store.
//!
//! Catalogs are built once at startup (TOML override or built-in defaults)
//! and passed explicitly to the scoring engine and query layer; there is no
//! ambient mutable catalog state anywhere.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::catalog::builtin_catalog;
use crate::config::load_catalog_from_env;
use crate::domain::QuizCatalog;
use crate::storage::{StoreError, SubmissionStore};

pub struct AppState {
  pub catalog: QuizCatalog,
  pub store: SubmissionStore,
}

impl AppState {
  /// Build state from env: resolve the catalog, open the database.
  ///
  /// QUIZ_CONFIG_PATH optionally points at a catalog TOML; QUIZ_DB_PATH
  /// picks the SQLite file (default `data/quiz.db`).
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Result<Self, StoreError> {
    let catalog = match load_catalog_from_env() {
      Some(c) => c,
      None => {
        // Built-in defaults keep the app useful without any config file.
        let c = builtin_catalog();
        debug_assert!(c.validate().is_ok());
        c
      }
    };
    info!(
      target: "quiz_backend",
      questions = catalog.questions.len(),
      archetypes = catalog.archetypes.len(),
      default = %catalog.default_archetype,
      "Catalog ready"
    );

    let db_path = std::env::var("QUIZ_DB_PATH")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("data/quiz.db"));
    let store = SubmissionStore::open(&db_path)?;

    Ok(Self { catalog, store })
  }
}
