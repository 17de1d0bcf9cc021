use async_trait::async_trait;
use saju_pm::{
    Error, Result,
    api::{AnalysisRequest, ApiClient, ChatRequest, ReplyResponse},
    controller::SubmitControl,
};
use std::sync::{Arc, Mutex};

/// Mock backend for testing
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub replies: Arc<Mutex<Vec<ReplyResponse>>>,
    pub analysis_requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    pub chat_requests: Arc<Mutex<Vec<ChatRequest>>>,
    pub error: Option<(u16, String)>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            analysis_requests: Arc::new(Mutex::new(Vec::new())),
            chat_requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push(ReplyResponse::new(reply));
        self
    }

    pub fn with_response(self, response: ReplyResponse) -> Self {
        self.replies.lock().unwrap().push(response);
        self
    }

    pub fn with_error(mut self, status: u16, message: &str) -> Self {
        self.error = Some((status, message.to_string()));
        self
    }

    pub fn get_analysis_requests(&self) -> Vec<AnalysisRequest> {
        self.analysis_requests.lock().unwrap().clone()
    }

    pub fn get_chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Result<ReplyResponse> {
        if let Some((status, ref message)) = self.error {
            return Err(Error::request(status, message.clone()));
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::internal("No more mock replies available"));
        }

        Ok(replies.remove(0))
    }
}

#[async_trait]
impl ApiClient for MockBackend {
    async fn request_analysis(&self, request: AnalysisRequest) -> Result<ReplyResponse> {
        self.analysis_requests.lock().unwrap().push(request);
        self.next_reply()
    }

    async fn send_chat(&self, request: ChatRequest) -> Result<ReplyResponse> {
        self.chat_requests.lock().unwrap().push(request);
        self.next_reply()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Submit control that records every state change
#[derive(Debug)]
pub struct RecordingButton {
    pub label: String,
    pub disabled: bool,
    pub events: Vec<String>,
}

impl RecordingButton {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            events: Vec::new(),
        }
    }
}

impl SubmitControl for RecordingButton {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.events.push(format!("disabled={}", disabled));
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        self.events.push(format!("label={}", label));
    }
}
