//! 종합 점수 계산기.
//!
//! 6개 팩터 스코어러를 실행하고 서브 점수를 합산하여 최종 점수(0~100)를
//! 산출합니다. 추세 분류는 이벤트당 한 번만 수행되어 캔들 패턴/추세 정합
//! 스코어러에 전달됩니다.
//!
//! 각 평가는 입력 이벤트만 읽는 순수 함수이며, 이벤트 간 공유 상태가
//! 없으므로 임의의 워커에서 병렬로 실행할 수 있습니다.

use chrono::Utc;
use tracing::debug;
use vnswing_core::{Candle, CompositeScoreResult, ScoreBreakdown, SignalEvent};

use crate::alignment::TrendAlignmentScorer;
use crate::candlestick::CandlestickScorer;
use crate::levels::SupportResistanceScorer;
use crate::liquidity::LiquidityScorer;
use crate::relative_strength::RelativeStrengthScorer;
use crate::trend::TrendClassifier;
use crate::vsa::VsaScorer;

/// 종합 스코어러.
///
/// 6개 팩터 스코어러의 합성이며, 시그널 이벤트 하나를 종합 점수 결과
/// 하나로 변환합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer {
    trend: TrendClassifier,
    candlestick: CandlestickScorer,
    vsa: VsaScorer,
    alignment: TrendAlignmentScorer,
    levels: SupportResistanceScorer,
    relative_strength: RelativeStrengthScorer,
    liquidity: LiquidityScorer,
}

impl CompositeScorer {
    /// 새로운 종합 스코어러 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시그널 이벤트 하나를 평가합니다.
    ///
    /// 구조적으로 유효한 이벤트에 대해 항상 결과를 반환합니다. 히스토리
    /// 부족, 0 분모 등의 경계 조건은 각 스코어러의 문서화된 중립 폴백으로
    /// 처리됩니다.
    pub fn evaluate(&self, event: &SignalEvent) -> CompositeScoreResult {
        let trend = self
            .trend
            .classify(event.snapshot.pct_vs_sma20, event.snapshot.pct_vs_sma50);

        let candlestick = self.candlestick.score(&event.pattern, trend);

        // 캔들 히스토리가 없으면 당일 봉 대신 현재가 기준 중립 봉을 사용
        let neutral_bar;
        let latest_bar = match event.latest_bar() {
            Some(bar) => bar,
            None => {
                neutral_bar = Candle::new(
                    Utc::now(),
                    event.price,
                    event.price,
                    event.price,
                    event.price,
                    rust_decimal::Decimal::ZERO,
                );
                &neutral_bar
            }
        };

        let vsa = self
            .vsa
            .score(latest_bar, &event.snapshot, event.direction, trend);
        let trend_alignment = self
            .alignment
            .score(&event.pattern, event.direction, trend);
        let sr = self.levels.score(&event.bars, event.price, event.direction);
        let rs = self
            .relative_strength
            .score(&event.rs_history, event.direction);
        let liquidity = self.liquidity.score(&event.snapshot);

        let breakdown = ScoreBreakdown {
            candlestick: candlestick.score,
            vsa: vsa.score,
            trend_alignment,
            support_resistance: sr.score,
            relative_strength: rs.score,
            liquidity: liquidity.score,
        };
        let total_score = breakdown.total().clamp(0, 100);

        debug!(
            ticker = %event.ticker,
            pattern = %event.pattern,
            direction = %event.direction,
            trend = %trend,
            candlestick = breakdown.candlestick,
            vsa = breakdown.vsa,
            trend_alignment = breakdown.trend_alignment,
            support_resistance = breakdown.support_resistance,
            relative_strength = breakdown.relative_strength,
            liquidity = breakdown.liquidity,
            total = total_score,
            "Composite score"
        );

        CompositeScoreResult {
            ticker: event.ticker.clone(),
            direction: event.direction,
            trend,
            total_score,
            breakdown,
            vsa_signal: vsa.signal.map(|signal| signal.as_str().to_string()),
            rs_rating: rs.rating,
            trading_value: event.snapshot.trading_value,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use vnswing_core::{RsPoint, TechnicalSnapshot, TradeDirection};

    fn create_test_event() -> SignalEvent {
        let bars: Vec<Candle> = (0..60)
            .map(|i| {
                let price = dec!(100) + Decimal::from(i) / dec!(4);
                Candle::new(
                    Utc::now(),
                    price,
                    price + dec!(1),
                    price - dec!(1),
                    price + dec!(0.5),
                    dec!(1_500_000),
                )
            })
            .collect();

        let rs_history: Vec<RsPoint> = (0..10)
            .map(|i| RsPoint::new(Utc::now(), 85.0 - i as f64))
            .collect();

        SignalEvent::new(
            "HPG",
            "hammer",
            TradeDirection::Buy,
            dec!(114.5),
            bars,
            TechnicalSnapshot {
                volume_ratio: 1.8,
                volume_ratio_5d: 1.3,
                atr_14: 2.5,
                trading_value: 35.0,
                pct_vs_sma20: -3.0,
                pct_vs_sma50: -2.5,
            },
            rs_history,
        )
    }

    #[test]
    fn test_evaluate_produces_bounded_result() {
        let scorer = CompositeScorer::new();
        let event = create_test_event();

        let result = scorer.evaluate(&event);

        assert!(result.total_score >= 0 && result.total_score <= 100);
        assert!(result.breakdown.candlestick >= 0 && result.breakdown.candlestick <= 15);
        assert!(result.breakdown.vsa >= 0 && result.breakdown.vsa <= 25);
        assert!(result.breakdown.trend_alignment >= 0 && result.breakdown.trend_alignment <= 20);
        assert!(
            result.breakdown.support_resistance >= 0 && result.breakdown.support_resistance <= 15
        );
        assert!(
            result.breakdown.relative_strength >= 0 && result.breakdown.relative_strength <= 15
        );
        assert!(result.breakdown.liquidity >= 0 && result.breakdown.liquidity <= 10);
        assert_eq!(result.total_score, result.breakdown.total());
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let scorer = CompositeScorer::new();
        let event = create_test_event();

        let first = scorer.evaluate(&event);
        let second = scorer.evaluate(&event);

        assert_eq!(first.total_score, second.total_score);
        assert_eq!(first.breakdown, second.breakdown);
        assert_eq!(first.vsa_signal, second.vsa_signal);
        assert_eq!(first.trend, second.trend);
    }

    #[test]
    fn test_trend_feeds_dependent_scorers() {
        let scorer = CompositeScorer::new();
        let event = create_test_event();

        let result = scorer.evaluate(&event);

        // SMA 이격도 -3.0/-2.5 → Downtrend; hammer 매수는 반전 오버라이드 18점
        assert_eq!(result.trend.to_string(), "downtrend");
        assert_eq!(result.breakdown.trend_alignment, 18);
        // hammer 기본 10 × 1.2 = 12
        assert_eq!(result.breakdown.candlestick, 12);
    }

    #[test]
    fn test_result_carries_diagnostics() {
        let scorer = CompositeScorer::new();
        let event = create_test_event();

        let result = scorer.evaluate(&event);

        assert_eq!(result.ticker, "HPG");
        assert_eq!(result.rs_rating, 85.0);
        assert_eq!(result.trading_value, 35.0);
    }

    #[test]
    fn test_empty_bars_does_not_panic() {
        let scorer = CompositeScorer::new();
        let event = SignalEvent::new(
            "SSI",
            "doji",
            TradeDirection::Buy,
            dec!(30),
            Vec::new(),
            TechnicalSnapshot::default(),
            Vec::new(),
        );

        let result = scorer.evaluate(&event);

        assert!(result.total_score >= 0 && result.total_score <= 100);
        // 히스토리 없음 → 지지/저항 중립 폴백 5, RS 폴백 5
        assert_eq!(result.breakdown.support_resistance, 5);
        assert_eq!(result.breakdown.relative_strength, 5);
        assert_eq!(result.rs_rating, 50.0);
    }
}
