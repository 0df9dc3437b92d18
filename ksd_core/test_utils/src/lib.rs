use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global mutex to serialize tests that modify the process working directory.
/// Changing the directory concurrently can lead to nondeterministic failures.
pub static TEST_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub use common::config::project::PROJECT_FILE_NAME;

/// A small deployment script touching every statement kind.
pub const ORDERS_SCRIPT: &str = r#"
-- session settings
SET 'auto.offset.reset' = 'earliest';

CREATE STREAM orders_raw (
    id INT KEY,
    amount DOUBLE,
    customer VARCHAR
) WITH (KAFKA_TOPIC='orders', VALUE_FORMAT='JSON', PARTITIONS=3);

CREATE TABLE customers (id VARCHAR PRIMARY KEY, name VARCHAR)
    WITH (KAFKA_TOPIC='customers', VALUE_FORMAT='JSON');

CREATE STREAM orders_enriched WITH (KAFKA_TOPIC='orders_enriched') AS
    SELECT o.id, o.amount, c.name
    FROM orders_raw o
    JOIN customers c ON o.customer = c.id
    EMIT CHANGES;

CREATE TABLE order_totals WITH (KAFKA_TOPIC='order_totals', VALUE_FORMAT='JSON') AS
    SELECT customer, SUM(amount) AS total
    FROM orders_raw
    GROUP BY customer
    EMIT CHANGES;

-- backfill from the legacy stream
INSERT INTO orders_enriched WITH (QUERY_ID='INSERTQUERY_LEGACY')
    SELECT id, amount, 'legacy' AS name FROM orders_raw EMIT CHANGES;
"#;

/// Writes `ksd-project.yml` into `root` and, when given, the script file at the
/// relative path `script.0`. Returns the project directory.
pub fn write_project(root: &Path, config_yaml: &str, script: Option<(&str, &str)>) -> PathBuf {
    fs::write(root.join(PROJECT_FILE_NAME), config_yaml).expect("write project config");

    if let Some((rel_path, contents)) = script {
        let path = root.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create script directory");
        }
        fs::write(&path, contents).expect("write script");
    }

    root.to_path_buf()
}

/// Temporarily change the current working directory for the duration of the closure.
/// Guards against concurrent `chdir` calls by taking the global `TEST_MUTEX` lock.
/// Always restores the original directory, even if the closure panics.
pub fn with_chdir<F, T>(target: impl AsRef<Path>, f: F) -> std::io::Result<T>
where
    F: FnOnce() -> T,
{
    let _lock = TEST_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let original = env::current_dir()?;
    env::set_current_dir(target.as_ref())?;

    struct Reset(PathBuf);
    impl Drop for Reset {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.0);
        }
    }
    let _guard = Reset(original);

    Ok(f())
}
