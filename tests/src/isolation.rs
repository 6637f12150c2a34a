use std::sync::atomic::{AtomicU32, Ordering};

/// Generates unique schema names for test isolation.
///
/// Each test gets a schema named `test_{process_id}_{test_counter}`, so tests
/// running in parallel against one server (within or across processes) never
/// touch each other's tables.
#[derive(Clone)]
#[allow(dead_code)] // Only used when server-backed features are enabled
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

// Global counter shared across all tests in this process
#[allow(dead_code)]
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

#[allow(dead_code)]
impl TestIsolation {
    /// Create a new test isolation instance with a unique counter.
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn schema(&self) -> String {
        format!("test_{}_{}", self.process_id, self.test_counter)
    }

    /// Whether `table_name` belongs to this instance under a prefixing
    /// dialect.
    pub fn owns_table(&self, table_name: &str) -> bool {
        table_name.starts_with(&format!("{}_", self.schema()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_schemas() {
        let isolation1 = TestIsolation::new();
        let isolation2 = TestIsolation::new();

        assert_ne!(isolation1.schema(), isolation2.schema());
        assert!(isolation1.schema().starts_with("test_"));
    }

    #[test]
    fn owns_prefixed_tables() {
        let isolation = TestIsolation::new();
        let table_name = format!("{}_users", isolation.schema());

        assert!(isolation.owns_table(&table_name));
        assert!(!TestIsolation::new().owns_table(&table_name));
    }

    #[test]
    fn schema_format() {
        let schema = TestIsolation::new().schema();

        let parts: Vec<&str> = schema.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "test");
        assert!(parts[1].parse::<u32>().is_ok());
        assert!(parts[2].parse::<u32>().is_ok());
    }
}
