use super::Table;

/// Named monotonic counters, bumped inside the transaction that consumes the value.
#[derive(Clone)]
pub struct SequenceTable;

impl Table for SequenceTable {
    fn name(&self) -> &'static str {
        "sequences"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sequences (
                name VARCHAR(64) PRIMARY KEY,
                value INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sequences;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
