//! Dreams (savings goals) and their progress

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_target, Result};
use crate::impact::ImpactModel;

/// A savings target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dream {
    pub title: String,
    /// Must be positive
    pub target_value: f64,
    /// May exceed `target_value`
    pub current_saved: f64,
    /// Stored for display; only `ImpactModel::for_target_date` reads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl Dream {
    /// Create a new dream, rejecting unusable targets up front
    pub fn new(title: impl Into<String>, target_value: f64, current_saved: f64) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            target_value: ensure_target(target_value)?,
            current_saved: ensure_finite("current_saved", current_saved)?,
            target_date: None,
        })
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Progress under the given model
    pub fn progress(&self, model: &ImpactModel) -> Result<GoalProgress> {
        model.progress(self.current_saved, self.target_value)
    }

    /// Days `amount` would advance this dream under the given model
    pub fn boost_days(&self, amount: f64, model: &ImpactModel) -> Result<i64> {
        model.boost_days(amount, self.target_value)
    }

    /// Record a contribution, returning the updated dream
    pub fn contribute(&self, amount: f64) -> Result<Self> {
        let amount = ensure_finite("amount", amount)?;
        Ok(Self {
            current_saved: self.current_saved + amount,
            ..self.clone()
        })
    }
}

/// Completion state of a dream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    /// Saved / target, clamped to 0.0 - 1.0
    pub percentage: f64,
    pub days_remaining: i64,
    /// Always 0: contributions are measured by `boost_days` and never folded
    /// back in here
    pub days_advanced: i64,
}

impl GoalProgress {
    pub fn is_complete(&self) -> bool {
        self.percentage >= 1.0
    }

    /// Percentage as a whole number 0-100 for display
    pub fn percent_display(&self) -> u8 {
        (self.percentage * 100.0).round() as u8
    }
}

impl ImpactModel {
    pub fn progress(&self, current_saved: f64, target_value: f64) -> Result<GoalProgress> {
        let rate = self.daily_rate(target_value)?;
        let current_saved = ensure_finite("current_saved", current_saved)?;

        let percentage = (current_saved / target_value).clamp(0.0, 1.0);
        let remaining = target_value - current_saved;
        let days_remaining = ((remaining / rate).round() as i64).max(0);

        Ok(GoalProgress {
            percentage,
            days_remaining,
            days_advanced: 0,
        })
    }

    /// Days a lump contribution advances the dream
    pub fn boost_days(&self, boost_amount: f64, target_value: f64) -> Result<i64> {
        let rate = self.daily_rate(target_value)?;
        let boost_amount = ensure_finite("boost_amount", boost_amount)?;
        Ok((boost_amount / rate).round() as i64)
    }
}

/// `ImpactModel::progress` under the default 365-day horizon
pub fn progress(current_saved: f64, target_value: f64) -> Result<GoalProgress> {
    ImpactModel::default().progress(current_saved, target_value)
}

/// `ImpactModel::boost_days` under the default 365-day horizon
pub fn boost_days(boost_amount: f64, target_value: f64) -> Result<i64> {
    ImpactModel::default().boost_days(boost_amount, target_value)
}
