use super::*;
use crate::{
    api::{AnalysisRequest, ApiClient, Gender},
    text::format_reply,
    timestamp::{BirthZone, compose_birth_iso},
};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub const ANALYSIS_LOADING_LABEL: &str = "분석 중…";
pub const ANALYSIS_WAITING: &str = "잠시만 기다려 주세요.";

/// Raw values of the birth-data form, read fresh for every submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthForm {
    /// `YYYY-MM-DD`; empty when not entered.
    pub date: String,
    /// `HH:MM`; empty means midnight.
    pub time: String,
    pub location: String,
    pub gender: Gender,
}

impl BirthForm {
    /// Validates the form and builds the request body. On failure returns the
    /// message to show instead.
    pub fn to_request(&self, zone: BirthZone) -> std::result::Result<AnalysisRequest, &'static str> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(MSG_DATE_REQUIRED);
        }

        let birth_iso =
            compose_birth_iso(date, Some(self.time.trim()), zone).ok_or(MSG_INVALID_DATE)?;

        let location = self.location.trim();
        if location.is_empty() {
            return Err(MSG_LOCATION_REQUIRED);
        }

        Ok(AnalysisRequest {
            birth_iso,
            location: location.to_string(),
            gender: self.gender,
        })
    }
}

pub struct AnalysisController<O, B> {
    client: Arc<dyn ApiClient>,
    zone: BirthZone,
    output: O,
    submit: B,
    loading: LoadingState,
}

impl<O: OutputPane, B: SubmitControl> AnalysisController<O, B> {
    pub fn new(client: Arc<dyn ApiClient>, zone: BirthZone, output: O, submit: B) -> Self {
        Self {
            client,
            zone,
            output,
            submit,
            loading: LoadingState::default(),
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn submit_control(&self) -> &B {
        &self.submit
    }

    /// Validates `form`, requests the analysis and renders the reordered reply.
    pub async fn submit(&mut self, form: &BirthForm) -> Outcome {
        let request_id = Uuid::new_v4();
        self.run(form)
            .instrument(info_span!("analysis", %request_id))
            .await
    }

    async fn run(&mut self, form: &BirthForm) -> Outcome {
        let request = match form.to_request(self.zone) {
            Ok(request) => request,
            Err(message) => {
                warn!("Analysis form rejected: {}", message);
                self.output.set_text(message);
                return Outcome::Invalid;
            }
        };

        info!(
            "Requesting analysis for {} ({})",
            request.birth_iso, request.gender
        );

        self.loading.start(&mut self.submit, ANALYSIS_LOADING_LABEL);
        self.output.set_text(ANALYSIS_WAITING);

        let outcome = match self.client.request_analysis(request).await {
            Ok(response) => {
                let ordered = format_reply(response.text());
                if ordered.is_empty() {
                    self.output.set_text(MSG_EMPTY_REPLY);
                    Outcome::Empty
                } else {
                    self.output.set_text(&ordered);
                    Outcome::Rendered
                }
            }
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                self.output.set_text(&failure_message(&e));
                Outcome::Failed
            }
        };

        self.loading.finish(&mut self.submit);
        outcome
    }
}
