//! 종합 점수 결과 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TradeDirection, TrendState};

/// 6개 팩터 서브 점수.
///
/// 각 팩터의 상한 합계는 정확히 100점입니다 (15+25+20+15+15+10).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 캔들 패턴 점수 (0~15)
    pub candlestick: i32,
    /// VSA 점수 (0~25)
    pub vsa: i32,
    /// 추세 정합 점수 (0~20)
    pub trend_alignment: i32,
    /// 지지/저항 점수 (0~15)
    pub support_resistance: i32,
    /// 상대강도 점수 (0~15)
    pub relative_strength: i32,
    /// 유동성 점수 (0~10)
    pub liquidity: i32,
}

impl ScoreBreakdown {
    /// 서브 점수 합계 (클램프 전).
    pub fn total(&self) -> i32 {
        self.candlestick
            + self.vsa
            + self.trend_alignment
            + self.support_resistance
            + self.relative_strength
            + self.liquidity
    }
}

/// 시그널 이벤트 하나에 대한 종합 스코어링 결과.
///
/// 평가 시점에 한 번 생성되며 이후 변경되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScoreResult {
    /// 종목 티커
    pub ticker: String,
    /// 매매 방향
    pub direction: TradeDirection,
    /// 평가 시점의 추세 상태
    pub trend: TrendState,
    /// 종합 점수 (0~100)
    pub total_score: i32,
    /// 팩터별 서브 점수
    pub breakdown: ScoreBreakdown,
    /// 감지된 VSA 시그널 라벨 (예: "stopping_volume")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsa_signal: Option<String>,
    /// RS 레이팅 (1~99, 데이터 없으면 50)
    pub rs_rating: f64,
    /// 거래대금 (십억 VND)
    pub trading_value: f64,
    /// 평가 시각
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_total() {
        let breakdown = ScoreBreakdown {
            candlestick: 12,
            vsa: 20,
            trend_alignment: 18,
            support_resistance: 10,
            relative_strength: 14,
            liquidity: 7,
        };
        assert_eq!(breakdown.total(), 81);
    }

    #[test]
    fn test_max_subscores_sum_to_100() {
        let max = ScoreBreakdown {
            candlestick: 15,
            vsa: 25,
            trend_alignment: 20,
            support_resistance: 15,
            relative_strength: 15,
            liquidity: 10,
        };
        assert_eq!(max.total(), 100);
    }

    #[test]
    fn test_result_serde_skips_none_signal() {
        let result = CompositeScoreResult {
            ticker: "VNM".to_string(),
            direction: TradeDirection::Buy,
            trend: TrendState::Sideways,
            total_score: 55,
            breakdown: ScoreBreakdown::default(),
            vsa_signal: None,
            rs_rating: 50.0,
            trading_value: 12.5,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("vsa_signal"));
    }
}
