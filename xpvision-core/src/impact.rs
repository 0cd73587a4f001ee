//! Day-impact arithmetic: how many days a transaction moves a dream, and the
//! "reality trigger" message shown next to discretionary spending.
//!
//! Every figure assumes the saver puts away `target / horizon_days` per day.
//! The default horizon is a fixed 365-day year, whatever target date the
//! dream carries. `ImpactModel::for_target_date` opts into the dated horizon.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_target, EngineError, Result};

/// Default savings horizon in days
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Average cost of one meal, in the app's currency (R$)
pub const MEAL_COST: f64 = 16.0;

/// Spending converted into relatable units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealityTrigger {
    pub meals_equivalent: i64,
    pub dream_days_lost: i64,
    pub message: String,
}

/// Parameters shared by the progress and impact calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImpactModel {
    horizon_days: f64,
    meal_cost: f64,
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self {
            horizon_days: DAYS_PER_YEAR,
            meal_cost: MEAL_COST,
        }
    }
}

impl ImpactModel {
    /// Model with a custom horizon, e.g. days until the dream's target date
    pub fn with_horizon_days(horizon_days: f64) -> Result<Self> {
        let horizon_days = ensure_finite("horizon_days", horizon_days)?;
        if horizon_days <= 0.0 {
            return Err(EngineError::invalid("horizon_days", horizon_days, "must be positive"));
        }
        Ok(Self {
            horizon_days,
            ..Self::default()
        })
    }

    /// Horizon measured from `today` to `target_date`. Dates in the past (or
    /// today) collapse to a one-day horizon.
    pub fn for_target_date(target_date: NaiveDate, today: NaiveDate) -> Self {
        let days = (target_date - today).num_days();
        if days < 1 {
            log::warn!("target date {target_date} is not after {today}; using a one-day horizon");
        }
        Self {
            horizon_days: days.max(1) as f64,
            ..Self::default()
        }
    }

    pub fn with_meal_cost(self, meal_cost: f64) -> Result<Self> {
        let meal_cost = ensure_finite("meal_cost", meal_cost)?;
        if meal_cost <= 0.0 {
            return Err(EngineError::invalid("meal_cost", meal_cost, "must be positive"));
        }
        Ok(Self { meal_cost, ..self })
    }

    pub fn horizon_days(&self) -> f64 {
        self.horizon_days
    }

    pub fn meal_cost(&self) -> f64 {
        self.meal_cost
    }

    /// Amount the saver is assumed to put away per day
    pub fn daily_rate(&self, target_value: f64) -> Result<f64> {
        Ok(ensure_target(target_value)? / self.horizon_days)
    }

    /// Signed day impact: expenses delay (negative), income advances (positive)
    pub fn impact_days(&self, amount: f64, target_value: f64) -> Result<i64> {
        let rate = self.daily_rate(target_value)?;
        let amount = ensure_finite("amount", amount)?;
        let days = (amount.abs() / rate).round() as i64;
        if amount < 0.0 {
            Ok(-days)
        } else {
            Ok(days)
        }
    }

    /// `_current_saved` does not enter the math; kept so callers can pass the
    /// whole dream state.
    pub fn reality_trigger(
        &self,
        amount: f64,
        target_value: f64,
        _current_saved: f64,
    ) -> Result<RealityTrigger> {
        let dream_days_lost = self.impact_days(amount, target_value)?.abs();
        let meals_equivalent = (amount.abs() / self.meal_cost).round() as i64;

        Ok(RealityTrigger {
            meals_equivalent,
            dream_days_lost,
            message: format!(
                "Com esse valor você poderia adiantar {} dias na sua meta.",
                dream_days_lost
            ),
        })
    }
}

/// `ImpactModel::impact_days` under the default 365-day horizon
pub fn impact_days(amount: f64, target_value: f64) -> Result<i64> {
    ImpactModel::default().impact_days(amount, target_value)
}

/// `ImpactModel::reality_trigger` under the default model
pub fn reality_trigger(amount: f64, target_value: f64, current_saved: f64) -> Result<RealityTrigger> {
    ImpactModel::default().reality_trigger(amount, target_value, current_saved)
}
