//! SQLite storage access: connection handling, schema, upsert statements and
//! natural-key lookups.
//!
//! Every table mutates through "insert or update on natural-key conflict"
//! only. The `CLASSIFICATIONS` and `CONSERVATION_STATUSES` tables are
//! prerequisites managed outside this tool and are not part of the schema
//! batch.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, Error, Transaction, params, params_from_iter, types::Value};

use crate::error::{Result, TaxorecError};

// ------------- Schema -------------
// NAME columns are unique so the ON CONFLICT(NAME) upserts have an index to
// land on.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS FIELDS (
        ID INTEGER PRIMARY KEY,
        NAME TEXT UNIQUE NOT NULL
    );
    CREATE TABLE IF NOT EXISTS RANKS (
        ID INTEGER PRIMARY KEY,
        NAME TEXT UNIQUE NOT NULL,
        LABEL TEXT NOT NULL,
        IS_MAIN INTEGER NOT NULL,
        REL_INDEX INTEGER NOT NULL,
        FIELD_ID INTEGER,
        FOREIGN KEY (FIELD_ID)
            REFERENCES FIELDS (ID)
    );
    CREATE TABLE IF NOT EXISTS GENUS_TYPES (
        ID INTEGER PRIMARY KEY,
        NAME TEXT UNIQUE NOT NULL
    );
    CREATE TABLE IF NOT EXISTS SUFFIXES (
        RANK_ID INTEGER NOT NULL,
        GENUS_TYPE_ID INTEGER NOT NULL,
        SUFFIX TEXT NOT NULL,
        CONSTRAINT RANK_GENUS_RANK_FK
            FOREIGN KEY (RANK_ID)
                REFERENCES RANKS (ID),
        CONSTRAINT RANK_GENUS_GENUS_FK
            FOREIGN KEY (GENUS_TYPE_ID)
                REFERENCES GENUS_TYPES (ID),
        CONSTRAINT RANK_GENUS_PK
            PRIMARY KEY (RANK_ID, GENUS_TYPE_ID)
    );
    CREATE TABLE IF NOT EXISTS ENTITIES (
        ID INTEGER PRIMARY KEY,
        NAME TEXT UNIQUE NOT NULL,
        CONS_STATUS_ID INTEGER NOT NULL,
        POP_EST INTEGER
    );
";

// ------------- Statements -------------
pub(crate) mod sql {
    pub const UPSERT_RANK: &str = "
        INSERT INTO RANKS (NAME, LABEL, IS_MAIN, REL_INDEX)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (NAME) DO UPDATE SET
                LABEL = excluded.LABEL,
                IS_MAIN = excluded.IS_MAIN,
                REL_INDEX = excluded.REL_INDEX
    ";
    pub const UPSERT_RANK_WITH_FIELD: &str = "
        INSERT INTO RANKS (NAME, LABEL, IS_MAIN, REL_INDEX, FIELD_ID)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (NAME) DO UPDATE SET
                LABEL = excluded.LABEL,
                IS_MAIN = excluded.IS_MAIN,
                REL_INDEX = excluded.REL_INDEX,
                FIELD_ID = excluded.FIELD_ID
    ";
    pub const UPSERT_FIELD: &str = "
        INSERT INTO FIELDS (NAME)
            VALUES (?)
            ON CONFLICT (NAME) DO UPDATE SET
                NAME = excluded.NAME
    ";
    pub const UPSERT_GENUS_TYPE: &str = "
        INSERT INTO GENUS_TYPES (NAME)
            VALUES (?)
            ON CONFLICT (NAME) DO UPDATE SET
                NAME = excluded.NAME
    ";
    pub const UPSERT_SUFFIX: &str = "
        INSERT INTO SUFFIXES (RANK_ID, GENUS_TYPE_ID, SUFFIX)
            VALUES (?, ?, ?)
            ON CONFLICT (RANK_ID, GENUS_TYPE_ID) DO UPDATE SET
                SUFFIX = excluded.SUFFIX
    ";
    pub const UPSERT_ENTITY: &str = "
        INSERT INTO ENTITIES (NAME, CONS_STATUS_ID)
            VALUES (?, ?)
            ON CONFLICT (NAME) DO UPDATE SET
                CONS_STATUS_ID = excluded.CONS_STATUS_ID
    ";
    pub const UPSERT_ENTITY_WITH_POP: &str = "
        INSERT INTO ENTITIES (NAME, CONS_STATUS_ID, POP_EST)
            VALUES (?, ?, ?)
            ON CONFLICT (NAME) DO UPDATE SET
                CONS_STATUS_ID = excluded.CONS_STATUS_ID,
                POP_EST = excluded.POP_EST
    ";
    pub const UPSERT_CLASSIFICATION: &str = "
        INSERT INTO CLASSIFICATIONS (ENTITY_ID, RANK_ID, NAME)
            VALUES (?, ?, ?)
            ON CONFLICT (ENTITY_ID, RANK_ID) DO UPDATE SET
                NAME = excluded.NAME
    ";
    pub const RANK_ID_BY_NAME: &str = "
        SELECT ID FROM RANKS
            WHERE NAME = ?
    ";
    pub const RANK_ID_BY_LABEL: &str = "
        SELECT ID FROM RANKS
            WHERE LABEL = ?
    ";
    pub const ENTITY_ID_BY_NAME: &str = "
        SELECT ID FROM ENTITIES
            WHERE NAME = ?
    ";
    pub const ALL_CONS_CODES: &str = "
        SELECT ID, CODE_RL FROM CONSERVATION_STATUSES
    ";
}

// ------------- Store -------------
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Store> {
        let conn = Connection::open(path).map_err(|e| TaxorecError::Connection(e.to_string()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Store> {
        let conn =
            Connection::open_in_memory().map_err(|e| TaxorecError::Connection(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Store> {
        // SUFFIXES references RANKS and GENUS_TYPES; SQLite only enforces
        // that with the pragma on.
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| TaxorecError::Connection(e.to_string()))?;
        Ok(Store { conn })
    }

    /// Create the structure tables when missing. Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn transaction(&self) -> Result<Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    pub(crate) fn execute(&self, statement: &str, row: Vec<Value>) -> Result<()> {
        self.conn.execute(statement, params_from_iter(row))?;
        Ok(())
    }

    fn id_by(&self, statement: &str, key: &str, entity: &'static str) -> Result<i64> {
        match self.conn.query_row(statement, params![key], |r| r.get(0)) {
            Ok(id) => Ok(id),
            Err(Error::QueryReturnedNoRows) => Err(TaxorecError::LookupMiss {
                entity,
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub fn rank_id_by_name(&self, name: &str) -> Result<i64> {
        self.id_by(sql::RANK_ID_BY_NAME, name, "rank")
    }

    pub fn rank_id_by_label(&self, label: &str) -> Result<i64> {
        self.id_by(sql::RANK_ID_BY_LABEL, label, "rank label")
    }

    pub fn entity_id_by_name(&self, name: &str) -> Result<i64> {
        self.id_by(sql::ENTITY_ID_BY_NAME, name, "entity")
    }

    /// Scan of the conservation-status code table, keyed on the 2-character
    /// code.
    pub fn conservation_codes(&self) -> Result<HashMap<String, i64>> {
        let mut stmt = self.conn.prepare(sql::ALL_CONS_CODES)?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(1)?, r.get::<_, i64>(0)?)))?;
        let mut codes = HashMap::new();
        for row in rows {
            let (code, id) = row?;
            codes.insert(code, id);
        }
        Ok(codes)
    }
}
