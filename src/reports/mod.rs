//! Reports API section (`/`, version `2009-01-01`).
//!
//! Reports are generated asynchronously: [`Reports::request_report`] returns a request id,
//! [`Reports::report_request_status`] tracks it and [`Reports::report`] downloads the result
//! once MWS reports it done.

pub mod types;

use chrono::{DateTime, Utc};

use self::types::{DONE, DONE_NO_DATA, Report, ReportPage, ReportRequestInfo};
use crate::Result;
use crate::codec::{Value, as_sequence};
use crate::error::Error;
use crate::executor::{Executor, Params, Payload, TIMESTAMP_FORMAT};
use crate::serde_helpers::from_value;

#[derive(Clone, Copy, Debug)]
pub struct Reports<'client> {
    executor: &'client Executor,
}

impl<'client> Reports<'client> {
    pub(crate) fn new(executor: &'client Executor) -> Self {
        Self { executor }
    }

    /// Asks MWS to generate a report of `report_type`, e.g. `_GET_MERCHANT_LISTINGS_DATA_`.
    ///
    /// Returns the report request id.
    pub async fn request_report(
        &self,
        report_type: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let mut params = Params::new();
        params
            .set("ReportType", report_type)
            .maybe_set(
                "StartDate",
                start_date.map(|date| date.format(TIMESTAMP_FORMAT).to_string()),
            )
            .maybe_set(
                "EndDate",
                end_date.map(|date| date.format(TIMESTAMP_FORMAT).to_string()),
            );

        let result = self
            .executor
            .execute("RequestReport", params, None)
            .await?
            .into_value();

        result
            .path(&["ReportRequestInfo", "ReportRequestId"])
            .and_then(Value::to_text)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::unexpected_response("RequestReport returned no ReportRequestId"))
    }

    /// Status of a report request, or `None` when MWS does not know it.
    pub async fn report_request_status(
        &self,
        report_request_id: &str,
    ) -> Result<Option<ReportRequestInfo>> {
        let mut params = Params::new();
        params.set("ReportRequestIdList.Id.1", report_request_id);

        let result = self
            .executor
            .execute("GetReportRequestList", params, None)
            .await?
            .into_value();

        match result.get("ReportRequestInfo") {
            Some(info) if !info.is_empty() => as_sequence(info.clone())
                .first()
                .map(from_value::<ReportRequestInfo>)
                .transpose(),
            _ => Ok(None),
        }
    }

    /// The generated report for a request.
    ///
    /// `None` while the request is unknown or still being processed; empty rows when MWS finished
    /// without data.
    pub async fn report(&self, report_request_id: &str) -> Result<Option<Report>> {
        let Some(status) = self.report_request_status(report_request_id).await? else {
            return Ok(None);
        };

        match status.report_processing_status.as_deref() {
            Some(DONE_NO_DATA) => return Ok(Some(Report::Rows(Vec::new()))),
            Some(DONE) => {}
            _ => return Ok(None),
        }

        let report_id = status.generated_report_id.ok_or_else(|| {
            Error::unexpected_response(format!(
                "report request {report_request_id} is done but has no GeneratedReportId"
            ))
        })?;

        let mut params = Params::new();
        params.set("ReportId", report_id);

        let report = match self.executor.execute("GetReport", params, None).await? {
            Payload::Text(body) => Report::from_flat_file(&body),
            Payload::Value(document) => Report::Document(document),
        };

        Ok(Some(report))
    }

    /// Reports generated in the previous 90 days, optionally only of `report_types`.
    pub async fn report_list<S: AsRef<str>>(&self, report_types: &[S]) -> Result<ReportPage> {
        let mut params = Params::new();
        params.set_list("ReportTypeList.Type", report_types.iter().map(AsRef::as_ref));

        self.executor.call("GetReportList", params).await
    }
}
