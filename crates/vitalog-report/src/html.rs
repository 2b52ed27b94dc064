//! HTML rendering of a report window and its rows.

use vitalog_core::{report::ReportRow, window::ReportWindow};

/// Inline table styling for the emailed report.
const STYLE: &str = "table{font-family:arial,sans-serif;border-collapse:collapse;width:100%;}\
td,th{border:1px solid #dddddd;text-align:left;padding:8px;}\
tr:nth-child(even){background-color:#dddddd;}";

const HEADERS: [&str; 5] = ["Datetime", "Category", "Value", "Parameter", "Person"];

/// Render the full report document: a human-readable date-range header and a
/// five-column table with one row per measurement, in store order. An empty
/// row set still renders the header-only table.
pub fn render(window: &ReportWindow, rows: &[ReportRow]) -> String {
  let mut table = String::from("<table><tr>");
  for header in HEADERS {
    table.push_str("<th>");
    table.push_str(header);
    table.push_str("</th>");
  }
  table.push_str("</tr>");

  for row in rows {
    table.push_str("<tr>");
    for cell in [
      &row.recorded_at,
      &row.category,
      &row.value,
      &row.parameter,
      &row.person,
    ] {
      table.push_str("<td>");
      table.push_str(&escape(cell));
      table.push_str("</td>");
    }
    table.push_str("</tr>");
  }
  table.push_str("</table>");

  format!(
    "<!DOCTYPE html><html><head><style>{STYLE}</style></head><body>\
     <h2>Health Data: {} to {}</h2>{table}</body></html>",
    window.from_label(),
    window.to_label(),
  )
}

/// Minimal escaping for text nodes. Pain descriptions and person names are
/// free text.
fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      _ => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use chrono::{Local, TimeZone};
  use vitalog_core::{
    measurement::{Category, Measurement},
    report,
    window::{PeriodToken, ReportWindow},
  };

  use super::*;

  fn window() -> ReportWindow {
    ReportWindow::resolve(
      PeriodToken::This,
      Local.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
    )
    .unwrap()
  }

  #[test]
  fn document_carries_range_header_and_rows() {
    let rows = report::rows(&[Measurement::new(
      Local.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
      Category::Heartbeat,
      "72",
    )]);

    let html = render(&window(), &rows);

    assert!(html.contains("<h2>Health Data: 06/01/2024 00:00:00 to 06/15/2024 10:00:00</h2>"));
    assert!(html.contains("<td>06/10/2024 09:00:00</td>"));
    assert!(html.contains("<td>heartbeat</td>"));
    assert!(html.contains("<td>72</td>"));
  }

  #[test]
  fn empty_report_still_renders_the_table_header() {
    let html = render(&window(), &[]);
    assert!(html.contains("<th>Datetime</th>"));
    assert!(!html.contains("<td>"));
  }

  #[test]
  fn free_text_cells_are_escaped() {
    let rows = report::rows(&[Measurement::new(
      Local.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
      Category::Pain,
      "sharp & <stabbing>",
    )]);

    let html = render(&window(), &rows);
    assert!(html.contains("<td>sharp &amp; &lt;stabbing&gt;</td>"));
  }
}
