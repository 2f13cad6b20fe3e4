//! 유동성 점수 계산 (최대 10점).
//!
//! 절대 거래대금과 단기 거래량 추세를 평가합니다. 거래대금 기준은
//! 베트남 주식 시장의 십억 VND 단위입니다.

use tracing::debug;
use vnswing_core::TechnicalSnapshot;

/// 유동성 점수 상세.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityScore {
    /// 최종 점수 (0~10)
    pub score: i32,
    /// 거래대금 점수 (0~8)
    pub tv_score: i32,
    /// 거래량 추세 보너스 (-2~+2)
    pub vol_bonus: i32,
}

/// 유동성 스코어러.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityScorer;

impl LiquidityScorer {
    /// 새로운 스코어러 인스턴스 생성.
    pub fn new() -> Self {
        Self
    }

    /// 스냅샷으로부터 유동성 점수 계산.
    pub fn score(&self, snapshot: &TechnicalSnapshot) -> LiquidityScore {
        let tv_score = Self::trading_value_score(snapshot.trading_value);
        let vol_bonus =
            Self::volume_trend_bonus(snapshot.volume_ratio_5d, snapshot.volume_ratio);
        let score = (tv_score + vol_bonus).clamp(0, 10);

        debug!(
            trading_value = snapshot.trading_value,
            tv_score = tv_score,
            vol_bonus = vol_bonus,
            score = score,
            "Liquidity score"
        );

        LiquidityScore {
            score,
            tv_score,
            vol_bonus,
        }
    }

    /// 거래대금 점수 (0~8, 십억 VND 기준).
    fn trading_value_score(trading_value: f64) -> i32 {
        if trading_value >= 50.0 {
            8
        } else if trading_value >= 30.0 {
            7
        } else if trading_value >= 15.0 {
            6
        } else if trading_value >= 8.0 {
            5
        } else if trading_value >= 4.0 {
            4
        } else if trading_value >= 2.0 {
            2
        } else if trading_value >= 1.0 {
            1
        } else {
            0
        }
    }

    /// 거래량 추세 보너스 (-2~+2).
    ///
    /// 단기(5일) 비율을 기본으로, 중기(20일) 비율 동반 확대 시 +2.
    fn volume_trend_bonus(ratio_5d: f64, ratio_20d: f64) -> i32 {
        if ratio_5d >= 1.5 && ratio_20d >= 1.3 {
            2
        } else if ratio_5d >= 1.2 {
            1
        } else if ratio_5d >= 0.8 {
            0
        } else if ratio_5d >= 0.5 {
            -1
        } else {
            -2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(trading_value: f64, ratio_5d: f64, ratio_20d: f64) -> TechnicalSnapshot {
        TechnicalSnapshot {
            trading_value,
            volume_ratio_5d: ratio_5d,
            volume_ratio: ratio_20d,
            ..Default::default()
        }
    }

    #[test]
    fn test_thin_stock_with_fading_volume() {
        // 거래대금 20억 + 거래량 위축 → 2 - 1 = 1
        let scorer = LiquidityScorer::new();
        let result = scorer.score(&snapshot(2.0, 0.6, 1.0));

        assert_eq!(result.tv_score, 2);
        assert_eq!(result.vol_bonus, -1);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_highly_liquid_with_expansion() {
        let scorer = LiquidityScorer::new();
        let result = scorer.score(&snapshot(80.0, 1.6, 1.4));

        assert_eq!(result.tv_score, 8);
        assert_eq!(result.vol_bonus, 2);
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_expansion_requires_both_ratios() {
        // 5일 비율만 높으면 +1
        let scorer = LiquidityScorer::new();
        let result = scorer.score(&snapshot(10.0, 1.6, 1.0));

        assert_eq!(result.vol_bonus, 1);
    }

    #[test]
    fn test_trading_value_boundaries() {
        assert_eq!(LiquidityScorer::trading_value_score(50.0), 8);
        assert_eq!(LiquidityScorer::trading_value_score(49.9), 7);
        assert_eq!(LiquidityScorer::trading_value_score(15.0), 6);
        assert_eq!(LiquidityScorer::trading_value_score(1.0), 1);
        assert_eq!(LiquidityScorer::trading_value_score(0.5), 0);
    }

    #[test]
    fn test_collapsed_volume_floor() {
        // 거래대금 0 + 거래량 붕괴 → 0 - 2 = -2 → 0으로 클램프
        let scorer = LiquidityScorer::new();
        let result = scorer.score(&snapshot(0.5, 0.3, 0.4));

        assert_eq!(result.vol_bonus, -2);
        assert_eq!(result.score, 0);
    }
}
