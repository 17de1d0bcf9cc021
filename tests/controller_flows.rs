use pretty_assertions::assert_eq;
use saju_pm::{
    api::{Gender, ReplyResponse, Role},
    config::ChatConfig,
    controller::*,
};
use std::sync::Arc;

mod common;
use common::mocks::{MockBackend, RecordingButton};
use common::test_utils::*;

fn analysis_controller(
    backend: &MockBackend,
) -> AnalysisController<TextBuffer, RecordingButton> {
    AnalysisController::new(
        Arc::new(backend.clone()),
        seoul_zone(),
        TextBuffer::new(),
        RecordingButton::new("분석하기"),
    )
}

fn chat_controller(backend: &MockBackend) -> ChatController<TextBuffer, RecordingButton> {
    ChatController::new(
        Arc::new(backend.clone()),
        create_test_config("http://unused").chat,
        TextBuffer::new(),
        RecordingButton::new("보내기"),
    )
}

#[tokio::test]
async fn test_analysis_happy_path() {
    let backend = MockBackend::new().with_reply(SAMPLE_REPLY);
    let mut controller = analysis_controller(&backend);

    let outcome = controller
        .submit(&create_birth_form("1990-05-17", "08:30", "서울"))
        .await;

    assert_eq!(outcome, Outcome::Rendered);
    assert!(outcome.is_success());

    let requests = backend.get_analysis_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].birth_iso, "1990-05-17T08:30:00+09:00");
    assert_eq!(requests[0].location, "서울");
    assert_eq!(requests[0].gender, Gender::Female);

    let history = controller.output().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], ANALYSIS_WAITING);
    assert!(history[1].starts_with("사주(전문/분석):\n사주 분석"));
    assert!(history[1].contains("(4) 추천 PM 직무:\nPO"));

    assert_eq!(
        controller.submit_control().events,
        vec![
            "disabled=true",
            "label=분석 중…",
            "disabled=false",
            "label=분석하기",
        ]
    );
}

#[tokio::test]
async fn test_analysis_validation_sends_nothing() {
    let backend = MockBackend::new().with_reply("unused");
    let mut controller = analysis_controller(&backend);

    let cases = [
        (create_birth_form("", "10:00", "서울"), MSG_DATE_REQUIRED),
        (create_birth_form("1990-13-01", "", "서울"), MSG_INVALID_DATE),
        (create_birth_form("1990-05-17", "25:00", "서울"), MSG_INVALID_DATE),
        (create_birth_form("1990-05-17", "", "  "), MSG_LOCATION_REQUIRED),
    ];

    for (form, message) in cases {
        let outcome = controller.submit(&form).await;
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(controller.output().text(), message);
    }

    assert!(backend.get_analysis_requests().is_empty());
    assert!(controller.submit_control().events.is_empty());
}

#[tokio::test]
async fn test_analysis_failure_is_rendered() {
    let backend = MockBackend::new().with_error(422, "bad field");
    let mut controller = analysis_controller(&backend);

    let outcome = controller
        .submit(&create_birth_form("1990-05-17", "", "부산"))
        .await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(controller.output().text(), "요청 처리에 실패했습니다: bad field");
    let button = controller.submit_control();
    assert!(!button.disabled);
    assert_eq!(button.label, "분석하기");
}

#[tokio::test]
async fn test_repeated_submissions_restore_original_label() {
    let backend = MockBackend::new()
        .with_response(ReplyResponse::default())
        .with_reply("강점: 꼼꼼함");
    let mut controller = analysis_controller(&backend);
    let form = create_birth_form("1990-05-17", "", "서울");

    assert_eq!(controller.submit(&form).await, Outcome::Empty);
    assert_eq!(controller.output().text(), MSG_EMPTY_REPLY);

    assert_eq!(controller.submit(&form).await, Outcome::Rendered);
    assert_eq!(
        controller.output().text(),
        "사주(전문/분석):\n강점: 꼼꼼함\n\n\n(1) 강점 2가지:\n꼼꼼함"
    );

    let button = controller.submit_control();
    assert_eq!(button.label, "분석하기");
    assert_eq!(button.events.len(), 8);
    assert_eq!(backend.get_analysis_requests().len(), 2);
}

#[tokio::test]
async fn test_chat_sends_system_and_user_messages() {
    let backend = MockBackend::new().with_reply("**안녕하세요!**");
    let mut controller = chat_controller(&backend);

    let outcome = controller.send("  오늘 운세 알려줘  ").await;

    assert_eq!(outcome, Outcome::Rendered);
    // chat replies are shown as received
    assert_eq!(controller.output().text(), "**안녕하세요!**");
    assert_eq!(controller.output().history()[0], CHAT_WAITING);

    let requests = backend.get_chat_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    let defaults = ChatConfig::default();
    assert_eq!(request.model, defaults.model);
    assert_eq!(request.temperature, defaults.temperature);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].content, defaults.system_prompt);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.messages[1].content, "오늘 운세 알려줘");

    assert_eq!(
        controller.submit_control().events,
        vec!["disabled=true", "label=전송 중…", "disabled=false", "label=보내기"]
    );
}

#[tokio::test]
async fn test_blank_chat_message_is_rejected() {
    let backend = MockBackend::new();
    let mut controller = chat_controller(&backend);

    assert_eq!(controller.send(" \n\t").await, Outcome::Invalid);
    assert_eq!(controller.output().text(), MSG_MESSAGE_REQUIRED);
    assert!(backend.get_chat_requests().is_empty());
}

#[tokio::test]
async fn test_chat_failure_message() {
    let backend = MockBackend::new().with_error(500, "OpenAI API 키가 설정되지 않았습니다.");
    let mut controller = chat_controller(&backend);

    assert_eq!(controller.send("안녕").await, Outcome::Failed);
    assert_eq!(
        controller.output().text(),
        "요청 처리에 실패했습니다: OpenAI API 키가 설정되지 않았습니다."
    );
    assert!(!controller.submit_control().disabled);
}
