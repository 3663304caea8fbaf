use sqlx::{Error, Sqlite, Transaction};

/// Transactional counters. The increment happens inside the caller's transaction,
/// so a value is consumed exactly when the row that uses it is committed.
#[derive(Default)]
pub struct SequenceRepository;

impl SequenceRepository {
    pub fn new() -> Self {
        Self
    }

    /// Bump an existing counter and return its new value, or `None` when the
    /// counter has never been started.
    pub async fn advance(
        &self,
        name: &str,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Option<i64>, Error> {
        let value: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE sequences SET value = value + 1
            WHERE name = $1
            RETURNING value
            "#,
        )
        .bind(name)
        .fetch_optional(&mut **transaction)
        .await?;

        Ok(value.map(|(value,)| value))
    }

    /// Start the named counter at `seed`. A counter started concurrently in the
    /// meantime is bumped instead.
    pub async fn start(
        &self,
        name: &str,
        seed: i64,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let (value,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO sequences (name, value) VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET value = value + 1
            RETURNING value
            "#,
        )
        .bind(name)
        .bind(seed)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(value)
    }
}
