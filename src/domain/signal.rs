//! Buy-zone signal classifier.
//!
//! Rules are checked in order and the first match wins:
//! 1. EMA fast known and price <= EMA fast            -> InZone
//! 2. EMA fast known and 0 < diff to support <= 2%    -> Alert
//! 3. resistance1 known and price >= resistance1      -> TakeProfit
//! 4. otherwise                                       -> Wait
//!
//! Rule 1 beats rule 3 when stale data satisfies both.

use crate::domain::indicator::IndicatorBundle;
use std::fmt;

/// Upper bound of the Alert band, as a fraction above EMA fast.
pub const ALERT_BAND: f64 = 0.02;

/// diff_to_support reported when no support level is known. Large enough to
/// sort after every real distance.
pub const FAR_FROM_SUPPORT: f64 = 9.99;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Signal bucket. The declaration order is the ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignalState {
    InZone,
    Alert,
    Wait,
    TakeProfit,
}

impl SignalState {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalState::InZone => "IN ZONE",
            SignalState::Alert => "ALERT",
            SignalState::Wait => "WAIT",
            SignalState::TakeProfit => "TAKE PROFIT",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBundle {
    pub state: SignalState,
    /// (price - ema_fast) / ema_fast, or [`FAR_FROM_SUPPORT`].
    pub diff_to_support: f64,
    /// (resistance1 - price) / price, 0 when price is unknown.
    pub upside: f64,
}

pub fn classify(bundle: &IndicatorBundle) -> SignalBundle {
    let price = bundle.price;
    let support = bundle.ema_fast;
    let resistance = bundle.resistance1;

    let diff_to_support = if support > 0.0 {
        (price - support) / support
    } else {
        FAR_FROM_SUPPORT
    };

    let state = if support > 0.0 && price <= support {
        SignalState::InZone
    } else if support > 0.0 && diff_to_support > 0.0 && diff_to_support <= ALERT_BAND {
        SignalState::Alert
    } else if resistance > 0.0 && price >= resistance {
        SignalState::TakeProfit
    } else {
        SignalState::Wait
    };

    let upside = if price > 0.0 {
        (resistance - price) / price
    } else {
        0.0
    };

    SignalBundle {
        state,
        diff_to_support,
        upside,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
    Unknown,
}

pub fn rsi_zone(rsi: f64) -> RsiZone {
    if rsi <= 0.0 || !rsi.is_finite() {
        RsiZone::Unknown
    } else if rsi < RSI_OVERSOLD {
        RsiZone::Oversold
    } else if rsi > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else {
        RsiZone::Neutral
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RsiZone::Oversold => "oversold",
            RsiZone::Neutral => "neutral",
            RsiZone::Overbought => "overbought",
            RsiZone::Unknown => "-",
        };
        f.pad(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bundle(price: f64, ema_fast: f64, resistance1: f64) -> IndicatorBundle {
        IndicatorBundle {
            price,
            prev_close: price,
            ema_fast,
            ema_slow: ema_fast,
            rsi: 50.0,
            resistance1,
            resistance2: resistance1,
        }
    }

    #[test]
    fn in_zone_below_support() {
        let s = classify(&bundle(95.0, 100.0, 120.0));
        assert_eq!(s.state, SignalState::InZone);
        assert!((s.diff_to_support - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn in_zone_at_support() {
        let s = classify(&bundle(100.0, 100.0, 120.0));
        assert_eq!(s.state, SignalState::InZone);
        assert_eq!(s.diff_to_support, 0.0);
    }

    #[test]
    fn alert_within_two_percent() {
        let s = classify(&bundle(101.5, 100.0, 120.0));
        assert_eq!(s.state, SignalState::Alert);
    }

    #[test]
    fn alert_upper_edge_inclusive() {
        let s = classify(&bundle(102.0, 100.0, 120.0));
        assert_eq!(s.state, SignalState::Alert);
    }

    #[test]
    fn wait_beyond_alert_band() {
        let s = classify(&bundle(110.0, 100.0, 120.0));
        assert_eq!(s.state, SignalState::Wait);
        assert!((s.upside - (10.0 / 110.0)).abs() < 1e-12);
    }

    #[test]
    fn take_profit_at_resistance() {
        let s = classify(&bundle(120.0, 100.0, 120.0));
        assert_eq!(s.state, SignalState::TakeProfit);
        assert_eq!(s.upside, 0.0);
    }

    #[test]
    fn alert_beats_take_profit() {
        // Tight band: price is both within 2% of support and above resistance.
        let s = classify(&bundle(101.0, 100.0, 100.5));
        assert_eq!(s.state, SignalState::Alert);
    }

    #[test]
    fn degenerate_in_zone_beats_take_profit() {
        let s = classify(&bundle(90.0, 100.0, 80.0));
        assert_eq!(s.state, SignalState::InZone);
    }

    #[test]
    fn missing_support_uses_far_sentinel() {
        let s = classify(&bundle(50.0, 0.0, 60.0));
        assert_eq!(s.diff_to_support, FAR_FROM_SUPPORT);
        assert_eq!(s.state, SignalState::Wait);
    }

    #[test]
    fn missing_support_can_still_take_profit() {
        let s = classify(&bundle(70.0, 0.0, 60.0));
        assert_eq!(s.state, SignalState::TakeProfit);
    }

    #[test]
    fn unavailable_bundle_waits() {
        let s = classify(&IndicatorBundle::UNAVAILABLE);
        assert_eq!(s.state, SignalState::Wait);
        assert_eq!(s.diff_to_support, FAR_FROM_SUPPORT);
        assert_eq!(s.upside, 0.0);
    }

    #[test]
    fn unknown_resistance_reports_full_downside() {
        let s = classify(&bundle(110.0, 100.0, 0.0));
        assert_eq!(s.state, SignalState::Wait);
        assert_eq!(s.upside, -1.0);
    }

    #[test]
    fn short_history_near_support_still_prices_upside() {
        // EMA fast is seeded but the 20-session band is not.
        let s = classify(&bundle(101.0, 100.9, 0.0));
        assert_eq!(s.state, SignalState::Alert);
        assert!((s.upside - (0.0 - 101.0) / 101.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_price_has_no_upside() {
        let s = classify(&bundle(0.0, 0.0, 60.0));
        assert_eq!(s.upside, 0.0);
    }

    #[test]
    fn state_order() {
        assert!(SignalState::InZone < SignalState::Alert);
        assert!(SignalState::Alert < SignalState::Wait);
        assert!(SignalState::Wait < SignalState::TakeProfit);
        assert_eq!(SignalState::InZone.ordinal(), 0);
        assert_eq!(SignalState::TakeProfit.ordinal(), 3);
    }

    #[test]
    fn state_display() {
        assert_eq!(SignalState::InZone.to_string(), "IN ZONE");
        assert_eq!(SignalState::TakeProfit.to_string(), "TAKE PROFIT");
    }

    #[test]
    fn rsi_zones() {
        assert_eq!(rsi_zone(0.0), RsiZone::Unknown);
        assert_eq!(rsi_zone(25.0), RsiZone::Oversold);
        assert_eq!(rsi_zone(30.0), RsiZone::Neutral);
        assert_eq!(rsi_zone(70.0), RsiZone::Neutral);
        assert_eq!(rsi_zone(85.0), RsiZone::Overbought);
    }

    proptest! {
        #[test]
        fn at_or_below_support_is_always_in_zone(
            ema_fast in 1.0f64..1000.0,
            below in 0.0f64..0.99,
            resistance_frac in 0.01f64..1.0,
        ) {
            let price = ema_fast * (1.0 - below);
            let resistance1 = price * resistance_frac;
            let s = classify(&bundle(price, ema_fast, resistance1));
            prop_assert_eq!(s.state, SignalState::InZone);
            prop_assert!(s.diff_to_support <= 0.0);
        }

        #[test]
        fn missing_support_never_in_zone_or_alert(
            price in 0.0f64..1000.0,
            resistance1 in 0.0f64..1000.0,
        ) {
            let s = classify(&bundle(price, 0.0, resistance1));
            prop_assert_eq!(s.diff_to_support, FAR_FROM_SUPPORT);
            prop_assert!(s.state != SignalState::InZone);
            prop_assert!(s.state != SignalState::Alert);
        }
    }
}
