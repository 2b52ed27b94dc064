//! End-to-end tests for the skill handlers: in-memory SQLite store, scripted
//! confirmation gate, recording mail transport.

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicUsize, Ordering},
};

use chrono::{Duration, Local};
use vitalog_core::{
  measurement::{Category, Measurement},
  store::MeasurementStore,
  window::ReportWindow,
};
use vitalog_report::{Mailer, ReportEmail};
use vitalog_store_sqlite::SqliteStore;

use crate::{Confirm, ConfirmRequest, Reply, Skill, SkillConfig};

fn init_logging() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

// ─── Host-seam doubles ───────────────────────────────────────────────────────

struct ScriptedConfirm {
  answer: bool,
  asked:  Arc<AtomicUsize>,
}

impl Confirm for ScriptedConfirm {
  async fn confirm(&self, _request: &ConfirmRequest) -> bool {
    self.asked.fetch_add(1, Ordering::SeqCst);
    self.answer
  }
}

#[derive(Clone, Default)]
struct RecordingMailer {
  sent: Arc<Mutex<Vec<(String, String, ReportEmail)>>>,
}

impl Mailer for RecordingMailer {
  type Error = std::convert::Infallible;

  async fn send(
    &self,
    from: &str,
    to: &str,
    email: &ReportEmail,
  ) -> Result<(), Self::Error> {
    self
      .sent
      .lock()
      .unwrap()
      .push((from.to_owned(), to.to_owned(), email.clone()));
    Ok(())
  }
}

#[derive(Debug)]
struct TransportDown;

impl std::fmt::Display for TransportDown {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("transport down")
  }
}

impl std::error::Error for TransportDown {}

struct FailingMailer;

impl Mailer for FailingMailer {
  type Error = TransportDown;

  async fn send(
    &self,
    _from: &str,
    _to: &str,
    _email: &ReportEmail,
  ) -> Result<(), Self::Error> {
    Err(TransportDown)
  }
}

#[derive(Debug)]
struct StoreDown;

impl std::fmt::Display for StoreDown {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("store unavailable")
  }
}

impl std::error::Error for StoreDown {}

/// A store whose every operation fails, simulating an unopenable backing
/// file.
struct DownStore;

impl MeasurementStore for DownStore {
  type Error = StoreDown;

  async fn insert(&self, _batch: Vec<Measurement>) -> Result<(), StoreDown> {
    Err(StoreDown)
  }

  async fn query(
    &self,
    _window: ReportWindow,
    _category: Category,
    _person: &str,
  ) -> Result<Vec<Measurement>, StoreDown> {
    Err(StoreDown)
  }
}

// ─── Harness ─────────────────────────────────────────────────────────────────

struct Harness {
  skill:  Skill<SqliteStore, ScriptedConfirm, RecordingMailer>,
  store:  SqliteStore,
  mailer: RecordingMailer,
  asked:  Arc<AtomicUsize>,
}

async fn harness(answer: bool) -> Harness {
  init_logging();

  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  let mailer = RecordingMailer::default();
  let asked = Arc::new(AtomicUsize::new(0));

  let skill = Skill::new(
    store.clone(),
    ScriptedConfirm { answer, asked: asked.clone() },
    mailer.clone(),
    SkillConfig {
      mail_to: "user@example.com".to_owned(),
      ..SkillConfig::default()
    },
  );

  Harness { skill, store, mailer, asked }
}

/// A window comfortably containing "now", for inspecting what a handler
/// wrote.
fn recent_window() -> ReportWindow {
  let now = Local::now();
  ReportWindow {
    from: now - Duration::days(1),
    to:   now + Duration::days(1),
  }
}

async fn stored(store: &SqliteStore, category: Category) -> Vec<Measurement> {
  store.query(recent_window(), category, "").await.unwrap()
}

// ─── Tracking ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn confirmed_heartbeat_is_saved() {
  let h = harness(true).await;

  assert_eq!(h.skill.track_heartbeat("72", None).await, Reply::Saved);

  let rows = stored(&h.store, Category::Heartbeat).await;
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].value, "72");
  assert_eq!(rows[0].person, "");
}

#[tokio::test]
async fn declined_confirmation_writes_nothing() {
  let h = harness(false).await;

  assert_eq!(h.skill.track_heartbeat("72", None).await, Reply::Cancelled);
  assert_eq!(h.asked.load(Ordering::SeqCst), 1);
  assert!(stored(&h.store, Category::Heartbeat).await.is_empty());
}

#[tokio::test]
async fn pressure_saves_two_rows_sharing_one_timestamp() {
  let h = harness(true).await;

  let reply = h.skill.track_pressure("120", "80", Some("alice")).await;
  assert_eq!(reply, Reply::Saved);

  let rows = h
    .store
    .query(recent_window(), Category::Pressure, "alice")
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].recorded_at, rows[1].recorded_at);
  assert_eq!(rows[0].value, "120");
  assert_eq!(rows[1].value, "80");
}

#[tokio::test]
async fn non_numeric_input_is_rejected_before_confirmation() {
  let h = harness(true).await;

  assert_eq!(
    h.skill.track_temperature("warm", None).await,
    Reply::InvalidInput
  );
  assert_eq!(
    h.skill.track_pressure("120", "low", None).await,
    Reply::InvalidInput
  );
  assert_eq!(
    h.skill.track_heartbeat("72.5", None).await,
    Reply::InvalidInput
  );

  assert_eq!(h.asked.load(Ordering::SeqCst), 0);
  assert!(stored(&h.store, Category::Temperature).await.is_empty());
  assert!(stored(&h.store, Category::Pressure).await.is_empty());
  assert!(stored(&h.store, Category::Heartbeat).await.is_empty());
}

#[tokio::test]
async fn pain_accepts_free_text() {
  let h = harness(true).await;

  assert_eq!(
    h.skill.track_pain("dull ache in the knee", None).await,
    Reply::Saved
  );

  let rows = stored(&h.store, Category::Pain).await;
  assert_eq!(rows[0].value, "dull ache in the knee");
}

#[tokio::test]
async fn empty_pain_description_is_invalid() {
  let h = harness(true).await;
  assert_eq!(h.skill.track_pain("  ", None).await, Reply::InvalidInput);
}

#[tokio::test]
async fn sugar_records_meal_status_as_parameter() {
  let h = harness(true).await;

  let reply = h
    .skill
    .track_sugar("5.4", Some("before breakfast"), None)
    .await;
  assert_eq!(reply, Reply::Saved);

  let rows = stored(&h.store, Category::Diabetes).await;
  assert_eq!(rows[0].value, "5.4");
  assert_eq!(rows[0].parameter, "before breakfast");
}

#[tokio::test]
async fn sugar_without_meal_status_abandons_quietly() {
  let h = harness(true).await;

  assert_eq!(h.skill.track_sugar("5.4", None, None).await, Reply::Cancelled);
  assert_eq!(h.asked.load(Ordering::SeqCst), 0);
  assert!(stored(&h.store, Category::Diabetes).await.is_empty());
}

#[tokio::test]
async fn unavailable_store_reports_save_failure_without_panicking() {
  init_logging();

  let skill = Skill::new(
    DownStore,
    ScriptedConfirm { answer: true, asked: Arc::new(AtomicUsize::new(0)) },
    RecordingMailer::default(),
    SkillConfig::default(),
  );

  assert_eq!(skill.track_heartbeat("72", None).await, Reply::SaveFailed);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_is_rendered_and_mailed() {
  let h = harness(true).await;
  h.skill.track_heartbeat("72", None).await;

  let reply = h.skill.generate_report("this", "heartbeat", None).await;
  assert_eq!(reply, Reply::ReportSent);

  let sent = h.mailer.sent.lock().unwrap();
  assert_eq!(sent.len(), 1);

  let (from, to, email) = &sent[0];
  assert_eq!(from, "Vitalog <reports@vitalog.local>");
  assert_eq!(to, "user@example.com");
  assert_eq!(email.subject, "Health Report - HEARTBEAT");
  assert!(email.html.contains("<td>72</td>"));
}

#[tokio::test]
async fn empty_month_still_sends_a_report() {
  let h = harness(true).await;

  let reply = h.skill.generate_report("this", "diabetes", None).await;
  assert_eq!(reply, Reply::ReportSent);
  assert_eq!(h.mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_period_or_category_is_rejected() {
  let h = harness(true).await;

  assert_eq!(
    h.skill.generate_report("yesterday", "heartbeat", None).await,
    Reply::InvalidInput
  );
  assert_eq!(
    h.skill.generate_report("this", "weight", None).await,
    Reply::InvalidInput
  );
  assert!(h.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn report_respects_person_filter() {
  let h = harness(true).await;
  h.skill.track_heartbeat("72", Some("alice")).await;

  h.skill.generate_report("this", "heartbeat", None).await;

  let sent = h.mailer.sent.lock().unwrap();
  // Alice's reading is invisible to the unspecified-person report.
  assert!(!sent[0].2.html.contains("<td>72</td>"));
}

#[tokio::test]
async fn failed_query_aborts_the_report() {
  init_logging();

  let mailer = RecordingMailer::default();
  let skill = Skill::new(
    DownStore,
    ScriptedConfirm { answer: true, asked: Arc::new(AtomicUsize::new(0)) },
    mailer.clone(),
    SkillConfig::default(),
  );

  let reply = skill.generate_report("this", "heartbeat", None).await;
  assert_eq!(reply, Reply::ReportFailed);
  assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_failure_is_swallowed() {
  init_logging();

  let store = SqliteStore::open_in_memory().await.unwrap();
  let skill = Skill::new(
    store,
    ScriptedConfirm { answer: true, asked: Arc::new(AtomicUsize::new(0)) },
    FailingMailer,
    SkillConfig::default(),
  );

  let reply = skill.generate_report("last", "pressure", None).await;
  assert_eq!(reply, Reply::ReportSent);
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn config_defaults_apply_when_the_file_is_absent() {
  let dir = tempfile::tempdir().unwrap();
  let cfg = SkillConfig::load(&dir.path().join("missing.toml")).unwrap();

  assert!(cfg.store_path.is_none());
  assert_eq!(cfg.mail_from, "Vitalog <reports@vitalog.local>");
  assert_eq!(cfg.mail_to, "");
}

#[test]
fn config_reads_values_from_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("vitalog.toml");
  std::fs::write(
    &path,
    "mail_to = \"user@example.com\"\nstore_path = \"/tmp/vitalog-test.db\"\n",
  )
  .unwrap();

  let cfg = SkillConfig::load(&path).unwrap();
  assert_eq!(cfg.mail_to, "user@example.com");
  assert_eq!(
    cfg.store_path.as_deref(),
    Some(std::path::Path::new("/tmp/vitalog-test.db"))
  );
}
