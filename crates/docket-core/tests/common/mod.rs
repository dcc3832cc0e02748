#![allow(dead_code)]

use docket_core::{Config, MemoryStore, SqliteStore, Tracker, TrackerBuilder};
use tempfile::TempDir;

/// Ceilings small enough to hit in a test.
pub fn test_config() -> Config {
    Config::default()
        .with_max_projects(3)
        .with_max_tasks_per_project(3)
}

/// Helper function to create an in-memory tracker
pub fn memory_tracker(config: Config) -> Tracker<MemoryStore> {
    TrackerBuilder::new().with_config(config).build_in_memory()
}

/// Helper function to create a SQLite tracker in a temporary directory
pub fn sqlite_tracker(config: Config) -> (TempDir, Tracker<SqliteStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_config(config)
        .build()
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Runs each listed generic test function against both backends.
///
/// Every function must have the signature `fn<S: Store>(&Tracker<S>)`.
macro_rules! for_each_backend {
    ($($name:ident),* $(,)?) => {
        mod memory {
            $(
                #[test]
                fn $name() {
                    let tracker = crate::common::memory_tracker(crate::common::test_config());
                    super::$name(&tracker);
                }
            )*
        }

        mod sqlite {
            $(
                #[test]
                fn $name() {
                    let (_temp_dir, tracker) =
                        crate::common::sqlite_tracker(crate::common::test_config());
                    super::$name(&tracker);
                }
            )*
        }
    };
}
