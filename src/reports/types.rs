//! Types for the Reports API section.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{DisplayFromStr, NoneAsEmptyString, serde_as};

use crate::codec::Value;
use crate::serde_helpers::Sequence;

/// Processing status of a finished report with content.
pub const DONE: &str = "_DONE_";
/// Processing status of a finished report that found nothing to report.
pub const DONE_NO_DATA: &str = "_DONE_NO_DATA_";

/// One row of a tab-delimited report, keyed by column header.
pub type Row = BTreeMap<String, String>;

/// Content of a generated report.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// A tab-delimited report
    Rows(Vec<Row>),
    /// An XML report, decoded
    Document(Value),
}

impl Report {
    /// Splits a tab-delimited body into rows keyed by the first line. Short rows are padded with
    /// empty values.
    #[must_use]
    pub fn from_flat_file(body: &str) -> Self {
        let mut lines = body.lines().map(|line| line.trim_end_matches('\r'));
        let Some(header) = lines.next() else {
            return Report::Rows(Vec::new());
        };
        let columns: Vec<&str> = header.split('\t').collect();

        let rows = lines
            .filter(|line| !line.is_empty())
            .map(|line| {
                let mut values = line.split('\t');
                columns
                    .iter()
                    .map(|column| {
                        (
                            (*column).to_owned(),
                            values.next().unwrap_or_default().to_owned(),
                        )
                    })
                    .collect()
            })
            .collect();

        Report::Rows(rows)
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct ReportRequestInfo {
    pub report_request_id: String,
    pub report_type: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub scheduled: Option<bool>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub submitted_date: Option<DateTime<Utc>>,
    /// `_SUBMITTED_`, `_IN_PROGRESS_`, `_CANCELLED_`, [`DONE`], [`DONE_NO_DATA`]
    pub report_processing_status: Option<String>,
    pub generated_report_id: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub started_processing_date: Option<DateTime<Utc>>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
}

/// A generated report, as listed by `GetReportList`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct ReportInfo {
    pub report_id: String,
    pub report_type: Option<String>,
    pub report_request_id: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub available_date: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub acknowledged: Option<bool>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct ReportPage {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "ReportInfo", default)]
    pub reports: Vec<ReportInfo>,
    pub next_token: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub has_next: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_xml;
    use crate::serde_helpers::from_value;

    #[test]
    fn flat_file_rows_are_keyed_by_header() {
        let report = Report::from_flat_file("sku\tasin\tprice\r\nA\tB001\t9.99\r\nB\tB002\r\n\r\n");

        let Report::Rows(rows) = report else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["sku"], "A");
        assert_eq!(rows[0]["price"], "9.99");
        assert_eq!(rows[1]["asin"], "B002");
        assert_eq!(rows[1]["price"], "", "short rows are padded");
    }

    #[test]
    fn empty_body_has_no_rows() {
        assert_eq!(Report::from_flat_file(""), Report::Rows(Vec::new()));
    }

    #[test]
    fn report_request_info_reads_status() -> crate::Result<()> {
        let decoded = from_xml(
            r"<GetReportRequestListResponse><GetReportRequestListResult>
  <HasNext>false</HasNext>
  <ReportRequestInfo>
    <ReportRequestId>2291326454</ReportRequestId>
    <ReportType>_GET_MERCHANT_LISTINGS_DATA_</ReportType>
    <StartDate>2009-01-21T02:10:39+00:00</StartDate>
    <EndDate>2009-02-13T02:10:39+00:00</EndDate>
    <Scheduled>false</Scheduled>
    <SubmittedDate>2009-02-20T02:10:39+00:00</SubmittedDate>
    <ReportProcessingStatus>_DONE_</ReportProcessingStatus>
    <GeneratedReportId>3538561173</GeneratedReportId>
    <StartedProcessingDate/>
  </ReportRequestInfo>
</GetReportRequestListResult></GetReportRequestListResponse>",
        )?;

        let info: ReportRequestInfo = from_value(
            decoded
                .path(&["GetReportRequestListResult", "ReportRequestInfo"])
                .unwrap(),
        )?;

        assert_eq!(info.report_request_id, "2291326454");
        assert_eq!(info.report_processing_status.as_deref(), Some(DONE));
        assert_eq!(info.generated_report_id.as_deref(), Some("3538561173"));
        assert_eq!(info.scheduled, Some(false));
        assert_eq!(info.started_processing_date, None);
        Ok(())
    }
}
