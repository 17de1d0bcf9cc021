use super::*;
use crate::{
    api::{ApiClient, ChatRequest},
    config::ChatConfig,
};
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

pub const CHAT_LOADING_LABEL: &str = "전송 중…";
pub const CHAT_WAITING: &str = "답변을 기다리는 중입니다.";

pub struct ChatController<O, B> {
    client: Arc<dyn ApiClient>,
    settings: ChatConfig,
    output: O,
    submit: B,
    loading: LoadingState,
}

impl<O: OutputPane, B: SubmitControl> ChatController<O, B> {
    pub fn new(client: Arc<dyn ApiClient>, settings: ChatConfig, output: O, submit: B) -> Self {
        Self {
            client,
            settings,
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

    /// Request body for `message`, or `None` if it is blank.
    pub fn build_request(&self, message: &str) -> Option<ChatRequest> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        Some(ChatRequest::new(
            self.settings.system_prompt.clone(),
            message,
            self.settings.model.clone(),
            self.settings.temperature,
        ))
    }

    /// Sends `message` and renders the raw reply.
    pub async fn send(&mut self, message: &str) -> Outcome {
        let request_id = Uuid::new_v4();
        self.run(message)
            .instrument(info_span!("chat", %request_id))
            .await
    }

    async fn run(&mut self, message: &str) -> Outcome {
        let Some(request) = self.build_request(message) else {
            warn!("Chat message rejected: empty");
            self.output.set_text(MSG_MESSAGE_REQUIRED);
            return Outcome::Invalid;
        };

        debug!("Sending chat message with model {}", request.model);

        self.loading.start(&mut self.submit, CHAT_LOADING_LABEL);
        self.output.set_text(CHAT_WAITING);

        let outcome = match self.client.send_chat(request).await {
            Ok(response) if response.text().is_empty() => {
                self.output.set_text(MSG_EMPTY_REPLY);
                Outcome::Empty
            }
            Ok(response) => {
                self.output.set_text(response.text());
                Outcome::Rendered
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.output.set_text(&failure_message(&e));
                Outcome::Failed
            }
        };

        self.loading.finish(&mut self.submit);
        outcome
    }
}
