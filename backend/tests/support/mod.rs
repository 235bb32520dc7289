//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use climate_api::db::LocalRepository;
use climate_api::models::{Measurement, Station};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Stations used by the fixtures, in id order.
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station::new(1, "WAIKIKI 717.2, HI US"),
        Station::new(2, "KANEOHE 838.1, HI US"),
    ]
}

/// Measurements spanning 2010-01-01 to 2017-08-23, in id order.
pub fn sample_measurements() -> Vec<Measurement> {
    vec![
        Measurement::new("USC00519397", "2010-01-01", Some(0.08), 65.0),
        Measurement::new("USC00519397", "2016-08-22", Some(0.4), 76.0),
        Measurement::new("USC00519397", "2016-08-23", Some(0.0), 81.0),
        Measurement::new("USC00513117", "2016-08-24", None, 79.0),
        Measurement::new("USC00519397", "2017-01-01", Some(0.0), 62.0),
        Measurement::new("USC00513117", "2017-01-15", Some(0.02), 70.0),
        Measurement::new("USC00519397", "2017-01-31", Some(0.0), 68.0),
        Measurement::new("USC00513117", "2017-02-01", Some(0.11), 73.0),
        Measurement::new("USC00519397", "2017-08-22", Some(0.0), 80.0),
        Measurement::new("USC00519397", "2017-08-23", Some(0.0), 81.0),
    ]
}

pub fn sample_local_repository() -> LocalRepository {
    LocalRepository::with_data(sample_measurements(), sample_stations())
}

#[cfg(feature = "sqlite-repo")]
pub mod sqlite {
    use std::path::{Path, PathBuf};

    use diesel::connection::SimpleConnection;
    use diesel::prelude::*;
    use diesel::sqlite::SqliteConnection;
    use tempfile::TempDir;

    use super::{sample_measurements, sample_stations};

    const CREATE_TABLES: &str = "
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        );
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        );
    ";

    /// A dataset file in a temporary directory, removed on drop.
    pub struct SqliteFixture {
        _dir: TempDir,
        path: PathBuf,
    }

    impl SqliteFixture {
        /// Dataset holding the sample rows.
        pub fn sample() -> Self {
            Self::sample_named("hawaii.sqlite")
        }

        /// Dataset holding the sample rows, stored under `file_name`.
        pub fn sample_named(file_name: &str) -> Self {
            let fixture = Self::empty_named(file_name);
            let mut sql = String::new();
            for (i, m) in sample_measurements().iter().enumerate() {
                let prcp = m.prcp.map_or("NULL".to_string(), |p| p.to_string());
                sql.push_str(&format!(
                    "INSERT INTO measurement VALUES ({}, '{}', '{}', {}, {});\n",
                    i + 1,
                    m.station,
                    m.date,
                    prcp,
                    m.tobs
                ));
            }
            for s in sample_stations() {
                sql.push_str(&format!(
                    "INSERT INTO station VALUES ({}, 'USC0051{:04}', '{}', 21.27, -157.82, 3.0);\n",
                    s.id, s.id, s.name
                ));
            }
            fixture.execute(&sql);
            fixture
        }

        /// Dataset with both tables created and no rows.
        pub fn empty() -> Self {
            Self::empty_named("hawaii.sqlite")
        }

        fn empty_named(file_name: &str) -> Self {
            let dir = tempfile::tempdir().expect("create temp dir");
            let path = dir.path().join(file_name);
            let fixture = Self { _dir: dir, path };
            fixture.execute(CREATE_TABLES);
            fixture
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn execute(&self, sql: &str) {
            let url = self.path.to_str().expect("utf-8 temp path");
            let mut conn = SqliteConnection::establish(url).expect("open fixture database");
            conn.batch_execute(sql).expect("populate fixture database");
        }
    }
}
