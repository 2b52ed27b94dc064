//! [`SqliteStore`] — the SQLite implementation of [`MeasurementStore`].

use std::path::{Path, PathBuf};

use vitalog_core::{
  measurement::{Category, Measurement},
  store::MeasurementStore,
  window::ReportWindow,
};

use crate::{
  Error, Result,
  encode::{RawMeasurement, encode_category, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A measurement store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. A
/// connection is used for exactly one transaction per operation; no handle
/// is ever held across a user-confirmation pause.
#[derive(Clone, Debug)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// An unopenable path (missing directory, unreadable file) is an `Err`,
  /// never a panic; callers treat it as "store unavailable" and abort the
  /// in-flight operation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store at its fixed default location, [`Self::default_path`].
  pub async fn open_default() -> Result<Self> {
    Self::open(Self::default_path()).await
  }

  /// The fixed on-disk location: `vitalog.db` in the user's home directory.
  pub fn default_path() -> PathBuf {
    dirs::home_dir()
      .unwrap_or_else(|| PathBuf::from("."))
      .join("vitalog.db")
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── MeasurementStore impl ───────────────────────────────────────────────────

impl MeasurementStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, batch: Vec<Measurement>) -> Result<()> {
    if batch.is_empty() {
      return Ok(());
    }

    let rows: Vec<(String, String, String, String, String)> = batch
      .iter()
      .map(|m| {
        (
          encode_dt(m.recorded_at),
          encode_category(m.category).to_owned(),
          m.value.clone(),
          m.parameter.clone(),
          m.person.clone(),
        )
      })
      .collect();

    self
      .conn
      .call(move |conn| {
        // One transaction for the whole batch: a failure mid-way rolls back
        // every row, so a pressure pair can never be half-written.
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO health_data (recorded_at, category, value, parameter, person)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for (recorded_at, category, value, parameter, person) in &rows {
            stmt.execute(rusqlite::params![
              recorded_at,
              category,
              value,
              parameter,
              person
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query(
    &self,
    window: ReportWindow,
    category: Category,
    person: &str,
  ) -> Result<Vec<Measurement>> {
    let from_str = encode_dt(window.from);
    let to_str = encode_dt(window.to);
    let category_str = encode_category(category).to_owned();
    let person = person.to_owned();

    let raws: Vec<RawMeasurement> = self
      .conn
      .call(move |conn| {
        // Both bounds strictly exclusive; a record at the exact first
        // instant of a month matches neither adjoining window.
        let mut stmt = conn.prepare(
          "SELECT recorded_at, category, value, parameter, person
           FROM health_data
           WHERE recorded_at > ?1 AND recorded_at < ?2
             AND category = ?3 AND person = ?4",
        )?;

        let rows = stmt
          .query_map(
            rusqlite::params![from_str, to_str, category_str, person],
            |row| {
              Ok(RawMeasurement {
                recorded_at: row.get(0)?,
                category:    row.get(1)?,
                value:       row.get(2)?,
                parameter:   row.get(3)?,
                person:      row.get(4)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawMeasurement::into_measurement)
      .collect()
  }
}
