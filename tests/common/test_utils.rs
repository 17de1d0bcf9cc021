use saju_pm::{
    Result,
    api::Gender,
    config::{ApiConfig, BirthConfig, ChatConfig, Config, LogsConfig},
    controller::BirthForm,
    timestamp::BirthZone,
};
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration pointing at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            analysis_path: "/api/saju-pm".to_string(),
            chat_path: "/api/chat".to_string(),
        },
        chat: ChatConfig::default(),
        birth: BirthConfig {
            time_zone: "+09:00".to_string(),
        },
        logs: LogsConfig {
            level: "debug".to_string(),
            json: false,
        },
    }
}

pub fn seoul_zone() -> BirthZone {
    "+09:00".parse().unwrap()
}

pub fn create_birth_form(date: &str, time: &str, location: &str) -> BirthForm {
    BirthForm {
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        gender: Gender::Female,
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("saju-pm.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
api:
  base_url: "http://127.0.0.1:9000"
  analysis_path: "/api/saju-pm"
  chat_path: "/api/chat"
chat:
  model: "gpt-4o"
  temperature: 0.2
  system_prompt: "간결하게 답하세요."
birth:
  time_zone: "+09:00"
logs:
  level: "info"
  json: true
"#;

/// A reply in the shape the backend usually produces
pub const SAMPLE_REPLY: &str = "\
## 사주 분석
당신의 사주는 목(木) 기운이 두드러지며 차분한 판단력이 돋보입니다.

**(2) 강점 2가지**
1. 꼼꼼함: 세부 사항을 놓치지 않습니다.
2. 공감 능력: 팀원의 의견을 잘 듣습니다.

(3) 보완해야 할 점 1가지: 결정이 다소 느릴 수 있습니다.

(4) 권장 행동 1줄: 매주 짧은 회고로 우선순위를 정리하세요.

(5) 추천 PM 직무: PO

(6) 관련 스킬 키워드 3개: 데이터 분석, 로드맵 수립, 이해관계자 관리

나의 PM적합도에 참고해보세요. 사주는 재미 요소입니다.";
