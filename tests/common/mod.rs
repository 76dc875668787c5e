//! Helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use sports_campaigns::db::{DbPool, establish_connection_pool, run_migrations};
use sports_campaigns::repository::DieselRepository;

/// Temporary database used in integration tests.
///
/// The file lives in its own temporary directory, removed together with the
/// SQLite `-wal` and `-shm` side files when the fixture is dropped.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);

        let pool = establish_connection_pool(&path.to_string_lossy())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb {
            path,
            pool,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }
}
