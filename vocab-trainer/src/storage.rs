use chrono::Utc;
use quiz::WordEntry;
use sqlx::{migrate::MigrateDatabase, query, query_scalar, Pool, Sqlite, SqlitePool};

/// Keeps whole word collections as JSON documents, one row per namespace.
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize(url: &str) -> sqlx::Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let pool = SqlitePool::connect(url).await?;
        sqlx::migrate!().run(&pool).await?;
        tracing::debug!(url, "opened word storage");
        Ok(Self { pool })
    }
}

impl Storage {
    /// Loads the collection saved under `namespace`.
    ///
    /// A missing row or a payload that no longer parses yields an empty
    /// collection.
    pub async fn load(&self, namespace: &str) -> sqlx::Result<Vec<WordEntry>> {
        let payload: Option<String> =
            query_scalar("SELECT payload FROM collections WHERE namespace = ?")
                .bind(namespace)
                .fetch_optional(&self.pool)
                .await?;
        let Some(payload) = payload else {
            tracing::debug!(namespace, "no saved words yet");
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<WordEntry>>(&payload) {
            Ok(words) => {
                tracing::debug!(namespace, count = words.len(), "loaded saved words");
                Ok(words)
            }
            Err(error) => {
                tracing::warn!(namespace, %error, "saved words are unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the collection saved under `namespace`.
    pub async fn save(&self, namespace: &str, words: &[WordEntry]) -> sqlx::Result<()> {
        let payload =
            serde_json::to_string(words).map_err(|error| sqlx::Error::Encode(Box::new(error)))?;
        query(
            "INSERT INTO collections(namespace, payload, saved_at) VALUES(?, ?, ?)
             ON CONFLICT(namespace) DO UPDATE SET payload = excluded.payload, saved_at = excluded.saved_at",
        )
        .bind(namespace)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        tracing::debug!(namespace, count = words.len(), "saved words");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn write_raw(&self, namespace: &str, payload: &str) -> sqlx::Result<()> {
        query("INSERT OR REPLACE INTO collections(namespace, payload) VALUES(?, ?)")
            .bind(namespace)
            .bind(payload)
            .execute(&self.pool)
            .await
            .map(|_| ())
    }
}

/// Accepts either a `sqlite:` URL or a plain file path.
pub fn database_url(location: &str) -> String {
    if location.starts_with("sqlite:") {
        location.to_owned()
    } else {
        format!("sqlite://{location}")
    }
}
