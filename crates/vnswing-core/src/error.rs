//! 스코어링 시스템의 에러 타입.
//!
//! 구조적으로 유효한 시그널 이벤트에 대해 스코어링 자체는 에러를 발생시키지
//! 않습니다. 이 타입은 입력 파싱, 설정 로드, 데이터 게이트 검증에 사용됩니다.

use thiserror::Error;

/// 핵심 시그널 에러.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 데이터 부족
    #[error("데이터 부족: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 기술적 스냅샷 없음
    #[error("기술적 스냅샷 없음: {0}")]
    MissingSnapshot(String),

    /// 잘못된 매매 방향
    #[error("잘못된 매매 방향: {0}")]
    InvalidDirection(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 시그널 작업을 위한 Result 타입.
pub type SignalResult<T> = Result<T, SignalError>;

impl From<config::ConfigError> for SignalError {
    fn from(err: config::ConfigError) -> Self {
        SignalError::Config(err.to_string())
    }
}
