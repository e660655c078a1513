use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use vocab_types::{LookupRecord, VocabularyTable};

use crate::decode::decode_lenient;

/// Every lookup with its word and book title, oldest first.
/// Columns come back as blobs so bad device text can be decoded leniently.
const LOOKUPS_QUERY: &str = r#"
    SELECT CAST(w.word AS BLOB), CAST(l.usage AS BLOB), CAST(b.title AS BLOB)
    FROM WORDS w
    JOIN LOOKUPS l ON l.word_key = w.id
    JOIN BOOK_INFO b ON l.book_key = b.id
    ORDER BY l.rowid
"#;

type RawLookup = (Option<Vec<u8>>, Option<Vec<u8>>, Option<Vec<u8>>);

/// Read-only handle on a device vocabulary database
pub struct VocabStore {
    conn: SqliteConnection,
    path: PathBuf,
}

impl VocabStore {
    /// Open the store read-only. The file must already exist.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Join words, lookups and books into table rows
    pub async fn fetch_lookups(&mut self) -> Result<VocabularyTable, StoreError> {
        let rows: Vec<RawLookup> = sqlx::query_as(LOOKUPS_QUERY)
            .fetch_all(&mut self.conn)
            .await?;

        let records = rows
            .into_iter()
            .map(|(word, usage, title)| {
                LookupRecord::new(
                    decode_lenient(word.as_deref()),
                    decode_lenient(usage.as_deref()),
                    decode_lenient(title.as_deref()),
                )
            })
            .collect();

        Ok(VocabularyTable::new(records))
    }

    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        Ok(())
    }

    /// Open, read every lookup, close
    pub async fn extract(path: &Path) -> Result<VocabularyTable, StoreError> {
        let mut store = Self::open(path).await?;
        let table = store.fetch_lookups().await?;
        tracing::info!("Extracted {} lookups from {}", table.len(), store.path.display());
        store.close().await?;
        Ok(table)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Vocabulary database not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to open vocabulary database {path}")]
    Open {
        path: PathBuf,
        source: sqlx::Error,
    },

    #[error("Failed to read lookups")]
    Query(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: [&str; 3] = [
        "CREATE TABLE WORDS (id TEXT PRIMARY KEY NOT NULL, word TEXT, stem TEXT, lang TEXT, \
         category INTEGER DEFAULT 0, timestamp INTEGER DEFAULT 0, profileid TEXT)",
        "CREATE TABLE LOOKUPS (id TEXT PRIMARY KEY NOT NULL, word_key TEXT, book_key TEXT, \
         dict_key TEXT, pos TEXT, usage TEXT, timestamp INTEGER DEFAULT 0)",
        "CREATE TABLE BOOK_INFO (id TEXT PRIMARY KEY NOT NULL, asin TEXT, guid TEXT, lang TEXT, \
         title TEXT, authors TEXT)",
    ];

    async fn create_store(path: &Path, statements: &[&str]) {
        let mut conn = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();

        for statement in statements {
            sqlx::query(statement).execute(&mut conn).await.unwrap();
        }

        conn.close().await.unwrap();
    }

    async fn create_kindle_store(path: &Path, data: &[&str]) {
        let statements: Vec<&str> = SCHEMA.iter().chain(data.iter()).copied().collect();
        create_store(path, &statements).await;
    }

    #[tokio::test]
    async fn test_extracts_joined_rows_in_lookup_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");
        create_kindle_store(
            &path,
            &[
                "INSERT INTO BOOK_INFO (id, title) VALUES ('b1', 'Book A'), ('b2', 'Book B')",
                "INSERT INTO WORDS (id, word) VALUES ('en:zeal', 'zeal'), ('en:apt', 'apt')",
                "INSERT INTO LOOKUPS (id, word_key, book_key, usage) VALUES \
                 ('l1', 'en:zeal', 'b2', 'with great zeal'), \
                 ('l2', 'en:apt', 'b1', 'an apt remark'), \
                 ('l3', 'en:zeal', 'b1', 'zeal again')",
            ],
        )
        .await;

        let table = VocabStore::extract(&path).await.unwrap();

        assert_eq!(
            table.records(),
            &[
                LookupRecord::new("zeal", "with great zeal", "Book B"),
                LookupRecord::new("apt", "an apt remark", "Book A"),
                LookupRecord::new("zeal", "zeal again", "Book A"),
            ]
        );
    }

    #[tokio::test]
    async fn test_lookups_without_book_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");
        create_kindle_store(
            &path,
            &[
                "INSERT INTO WORDS (id, word) VALUES ('en:lone', 'lone')",
                "INSERT INTO LOOKUPS (id, word_key, book_key, usage) VALUES ('l1', 'en:lone', 'gone', 'lone')",
            ],
        )
        .await;

        let table = VocabStore::extract(&path).await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_text_is_decoded_leniently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");
        create_kindle_store(
            &path,
            &[
                "INSERT INTO BOOK_INFO (id, title) VALUES ('b1', NULL)",
                "INSERT INTO WORDS (id, word) VALUES ('en:cafe', CAST(X'636166FF65' AS TEXT))",
                "INSERT INTO LOOKUPS (id, word_key, book_key, usage) VALUES \
                 ('l1', 'en:cafe', 'b1', CAST(X'EFBBBF612063616665' AS TEXT))",
            ],
        )
        .await;

        let table = VocabStore::extract(&path).await.unwrap();

        assert_eq!(table.records(), &[LookupRecord::new("cafe", "a cafe", "")]);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let err = VocabStore::extract(&path).await.err().unwrap();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_store_file_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");
        create_kindle_store(
            &path,
            &[
                "INSERT INTO BOOK_INFO (id, title) VALUES ('b1', 'Book A')",
                "INSERT INTO WORDS (id, word) VALUES ('en:apt', 'apt')",
                "INSERT INTO LOOKUPS (id, word_key, book_key, usage) VALUES ('l1', 'en:apt', 'b1', 'apt')",
            ],
        )
        .await;
        let before = std::fs::read(&path).unwrap();

        let table = VocabStore::extract(&path).await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(std::fs::read(&path).unwrap(), before);
        for suffix in ["-wal", "-shm", "-journal"] {
            let sibling = dir.path().join(format!("vocab.db{suffix}"));
            assert!(!sibling.exists(), "{} left behind", sibling.display());
        }
    }

    #[tokio::test]
    async fn test_directory_is_not_reported_missing() {
        let dir = tempfile::tempdir().unwrap();

        let result = VocabStore::extract(dir.path()).await;

        assert!(matches!(
            result,
            Err(StoreError::Open { .. }) | Err(StoreError::Query(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_tables_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        create_store(&path, &["CREATE TABLE unrelated (id INTEGER)"]).await;

        let err = VocabStore::extract(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn test_garbage_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");
        std::fs::write(&path, "definitely not a sqlite database, just some text").unwrap();

        let result = VocabStore::extract(&path).await;
        assert!(matches!(
            result,
            Err(StoreError::Open { .. }) | Err(StoreError::Query(_))
        ));
    }
}
