//! SQLite store for classified documents
//!
//! Rows are append-only: a document is inserted once, fully classified, and
//! never updated. The autoincrement row id therefore doubles as the corpus
//! insertion order that retrieval results follow.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::retrieval::filters::PlaceFilter;
use crate::types::document::{Document, NewDocument};

/// Fields the keyword fallback searches, in clause order
const KEYWORD_FIELDS: [&str; 5] = [
    "filename",
    "governing_law",
    "geography",
    "agreement_type",
    "industry",
];

/// SQLite-backed document store
pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Storage(format!("Failed to open in-memory database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        // WAL keeps readers unblocked while the background worker inserts
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::Storage(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                content_type TEXT,
                size_bytes INTEGER NOT NULL,
                text TEXT,
                agreement_type TEXT NOT NULL,
                governing_law TEXT,
                geography TEXT,
                industry TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_filename ON documents(filename);
            CREATE INDEX IF NOT EXISTS idx_documents_agreement_type ON documents(agreement_type);
            CREATE INDEX IF NOT EXISTS idx_documents_governing_law ON documents(governing_law);
            CREATE INDEX IF NOT EXISTS idx_documents_geography ON documents(geography);
            CREATE INDEX IF NOT EXISTS idx_documents_industry ON documents(industry);
            CREATE INDEX IF NOT EXISTS idx_documents_created_at ON documents(created_at);
        "#,
        )
        .map_err(|e| Error::Storage(format!("Failed to run migrations: {}", e)))?;

        tracing::debug!("Database migrations complete");
        Ok(())
    }

    /// Insert a classified document; returns the stored row with its id
    pub fn insert_document(&self, doc: &NewDocument) -> Result<Document> {
        let conn = self.conn.lock();

        conn.execute(
            r#"
            INSERT INTO documents (
                filename, content_type, size_bytes, text,
                agreement_type, governing_law, geography, industry, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                doc.filename,
                doc.content_type,
                doc.size_bytes as i64,
                doc.text,
                doc.metadata.agreement_type,
                doc.metadata.governing_law,
                doc.metadata.geography,
                doc.metadata.industry,
                doc.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| Error::Storage(format!("Failed to insert document: {}", e)))?;

        let id = conn.last_insert_rowid();

        Ok(Document {
            id,
            filename: doc.filename.clone(),
            content_type: doc.content_type.clone(),
            size_bytes: doc.size_bytes,
            text: doc.text.clone(),
            agreement_type: doc.metadata.agreement_type.clone(),
            governing_law: doc.metadata.governing_law.clone(),
            geography: doc.metadata.geography.clone(),
            industry: doc.metadata.industry.clone(),
            created_at: doc.created_at,
        })
    }

    /// Get a document by row id
    pub fn get_document(&self, id: i64) -> Result<Option<Document>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare("SELECT * FROM documents WHERE id = ?1")
            .map_err(|e| Error::Storage(format!("Failed to prepare query: {}", e)))?;

        let doc = stmt
            .query_row(params![id], row_to_document)
            .optional()
            .map_err(|e| Error::Storage(format!("Failed to get document: {}", e)))?;

        Ok(doc)
    }

    /// List all documents in insertion order
    pub fn list_documents(&self) -> Result<Vec<Document>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare("SELECT * FROM documents ORDER BY id")
            .map_err(|e| Error::Storage(format!("Failed to prepare query: {}", e)))?;

        let docs = stmt
            .query_map([], row_to_document)
            .map_err(|e| Error::Storage(format!("Failed to list documents: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(docs)
    }

    /// Total number of stored documents
    pub fn count_documents(&self) -> Result<usize> {
        let conn = self.conn.lock();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(|e| Error::Storage(format!("Failed to count documents: {}", e)))?;

        Ok(count as usize)
    }

    /// Case-insensitive substring match per populated filter key
    ///
    /// Conditions are OR-combined. A NULL field value never matches a LIKE
    /// clause, so rows are implicitly restricted to non-null values.
    pub fn find_by_place(&self, filter: &PlaceFilter, limit: usize) -> Result<Vec<Document>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(place) = &filter.governing_law {
            conditions.push("LOWER(governing_law) LIKE ?");
            values.push(format!("%{}%", place.to_lowercase()));
        }
        if let Some(place) = &filter.geography {
            conditions.push("LOWER(geography) LIKE ?");
            values.push(format!("%{}%", place.to_lowercase()));
        }

        if conditions.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT * FROM documents WHERE {} ORDER BY id LIMIT {}",
            conditions.join(" OR "),
            limit
        );

        self.query_documents(&sql, &values)
    }

    /// Keyword lookup: every token OR-combined across the searchable fields
    pub fn find_by_keywords(&self, tokens: &[String], limit: usize) -> Result<Vec<Document>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        for token in tokens {
            let like = format!("%{}%", token.to_lowercase());
            for field in KEYWORD_FIELDS {
                conditions.push(format!("LOWER({}) LIKE ?", field));
                values.push(like.clone());
            }
        }

        let sql = format!(
            "SELECT * FROM documents WHERE {} ORDER BY id LIMIT {}",
            conditions.join(" OR "),
            limit
        );

        self.query_documents(&sql, &values)
    }

    fn query_documents(&self, sql: &str, values: &[String]) -> Result<Vec<Document>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| Error::Storage(format!("Failed to prepare query: {}", e)))?;

        let docs = stmt
            .query_map(params_from_iter(values.iter()), row_to_document)
            .map_err(|e| Error::Storage(format!("Failed to search documents: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(docs)
    }
}

fn row_to_document(row: &rusqlite::Row) -> rusqlite::Result<Document> {
    let created_at_str: String = row.get(9)?;

    Ok(Document {
        id: row.get(0)?,
        filename: row.get(1)?,
        content_type: row.get(2)?,
        size_bytes: row.get::<_, i64>(3)? as u64,
        text: row.get(4)?,
        agreement_type: row.get(5)?,
        governing_law: row.get(6)?,
        geography: row.get(7)?,
        industry: row.get(8)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
