use crate::errors::Errors::{self, NoStoredState, StorageFailure};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Durable record of the latest state of each key chain, keyed by the fixed
/// slot names from [`crate::Variant::slot_name`]. A put overwrites the
/// previous record for that slot; concurrent writers to one slot are
/// serialised by the backend.
pub trait StateStore: Send + Sync {
    fn put(&self, slot: &str, state_of_key_chain: &[u8]) -> Result<(), Errors>;
    fn get(&self, slot: &str) -> Result<Vec<u8>, Errors>;
}

/// In-memory backend for tests, demos and short-lived chains.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn put(&self, slot: &str, state_of_key_chain: &[u8]) -> Result<(), Errors> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageFailure("In-memory store lock poisoned.".to_string()))?;
        slots.insert(slot.to_string(), state_of_key_chain.to_vec());

        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Vec<u8>, Errors> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageFailure("In-memory store lock poisoned.".to_string()))?;

        slots
            .get(slot)
            .cloned()
            .ok_or_else(|| NoStoredState(format!("No state stored under slot \"{slot}\".")))
    }
}

/// SQLite-backed store: one row per slot in a single `chain_state` table.
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Errors> {
        let connection = Connection::open(path)
            .map_err(|err| StorageFailure(format!("Failed to open the database: {err}")))?;
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self, Errors> {
        let connection = Connection::open_in_memory()
            .map_err(|err| StorageFailure(format!("Failed to open the database: {err}")))?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, Errors> {
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS chain_state (
                    slot TEXT PRIMARY KEY,
                    state BLOB NOT NULL
                )",
                params![],
            )
            .map_err(|err| StorageFailure(format!("Failed to create the state table: {err}")))?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }
}

impl StateStore for SqliteStore {
    fn put(&self, slot: &str, state_of_key_chain: &[u8]) -> Result<(), Errors> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| StorageFailure("Database connection lock poisoned.".to_string()))?;

        connection
            .execute(
                "INSERT INTO chain_state (slot, state) VALUES (?1, ?2)
                 ON CONFLICT(slot) DO UPDATE SET state = excluded.state",
                params![slot, state_of_key_chain],
            )
            .map_err(|err| StorageFailure(format!("Failed to store state for \"{slot}\": {err}")))?;

        debug!(slot, bytes = state_of_key_chain.len(), "persisted chain state");
        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Vec<u8>, Errors> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| StorageFailure("Database connection lock poisoned.".to_string()))?;

        connection
            .query_row(
                "SELECT state FROM chain_state WHERE slot = ?1",
                params![slot],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(|err| StorageFailure(format!("Failed to fetch state for \"{slot}\": {err}")))?
            .ok_or_else(|| NoStoredState(format!("No state stored under slot \"{slot}\".")))
    }
}
