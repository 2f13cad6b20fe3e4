//! 추세 정합 점수 계산 (최대 20점).
//!
//! 매매 방향이 현재 추세와 얼마나 맞는지를 평가합니다. 인식된 반전 패턴은
//! 표준 매트릭스 대신 반전 테이블을 사용합니다: 하락 추세 바닥의 상승 반전
//! 패턴이 최고점을 받습니다.

use tracing::debug;
use vnswing_core::{TradeDirection, TrendState};

use crate::candlestick::{is_bearish_reversal, is_bullish_reversal};

/// 매칭되지 않는 조합의 기본 점수.
const DEFAULT_SCORE: i32 = 10;

/// 추세 정합 스코어러.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAlignmentScorer;

impl TrendAlignmentScorer {
    /// 새로운 스코어러 인스턴스 생성.
    pub fn new() -> Self {
        Self
    }

    /// 패턴/방향/추세로부터 정합 점수 계산.
    ///
    /// # 인자
    ///
    /// * `pattern` - 정규화된 소문자 패턴명
    /// * `direction` - 매매 방향
    /// * `trend` - 현재 추세 상태
    pub fn score(
        &self,
        pattern: &str,
        direction: TradeDirection,
        trend: TrendState,
    ) -> i32 {
        // 반전 패턴 오버라이드: 반전 대상 추세일수록 높은 점수
        if direction == TradeDirection::Buy && is_bullish_reversal(pattern) {
            let score = match trend {
                TrendState::StrongDown => 20,
                TrendState::Downtrend => 18,
                TrendState::Sideways => 10,
                TrendState::Uptrend => 5,
                TrendState::StrongUp => 0,
            };
            debug!(pattern = pattern, trend = %trend, score = score, "Bullish reversal override");
            return score;
        }

        if direction == TradeDirection::Sell && is_bearish_reversal(pattern) {
            let score = match trend {
                TrendState::StrongUp => 20,
                TrendState::Uptrend => 18,
                TrendState::Sideways => 10,
                TrendState::Downtrend => 5,
                TrendState::StrongDown => 0,
            };
            debug!(pattern = pattern, trend = %trend, score = score, "Bearish reversal override");
            return score;
        }

        // 표준 매트릭스
        match (direction, trend) {
            (TradeDirection::Buy, TrendState::StrongUp) => 20,
            (TradeDirection::Buy, TrendState::Uptrend) => 17,
            (TradeDirection::Buy, TrendState::Sideways) => 12,
            (TradeDirection::Buy, TrendState::Downtrend) => 7,
            (TradeDirection::Buy, TrendState::StrongDown) => 4,

            (TradeDirection::Sell, TrendState::StrongDown) => 20,
            (TradeDirection::Sell, TrendState::Downtrend) => 17,
            (TradeDirection::Sell, TrendState::Sideways) => 12,
            (TradeDirection::Sell, TrendState::Uptrend) => 7,
            (TradeDirection::Sell, TrendState::StrongUp) => 4,

            (TradeDirection::Bounce, TrendState::Downtrend) => 12,
            (TradeDirection::Bounce, TrendState::StrongDown) => 10,
            (TradeDirection::Bounce, TrendState::StrongUp) => 6,

            _ => DEFAULT_SCORE,
        }
    }
}
