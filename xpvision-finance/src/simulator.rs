//! "Think before you buy" simulator: how far a purchase pushes the dream back.

use serde::{Deserialize, Serialize};
use xpvision_core::{Dream, EngineError, ImpactModel, Result};

/// Purchases above this are flagged as significant
pub const SIGNIFICANT_SPEND: f64 = 100.0;
/// Purchases above this get a cheaper-alternative nudge
pub const MODERATE_SPEND: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Wait 24h before deciding
    WaitADay,
    ConsiderCheaper,
    Reasonable,
}

impl Recommendation {
    pub fn for_value(value: f64) -> Self {
        if value > SIGNIFICANT_SPEND {
            Recommendation::WaitADay
        } else if value > MODERATE_SPEND {
            Recommendation::ConsiderCheaper
        } else {
            Recommendation::Reasonable
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::WaitADay => {
                "⚠️ Esse valor é significativo! Considere esperar 24h antes de decidir."
            }
            Recommendation::ConsiderCheaper => "💡 Que tal pensar em uma alternativa mais barata?",
            Recommendation::Reasonable => {
                "✅ Valor razoável, mas sempre vale questionar: realmente preciso disso agora?"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub value: f64,
    pub days_delayed: i64,
    pub recommendation: Recommendation,
    pub what_could_be_done: Vec<String>,
}

/// Simulate spending `value` against `dream`
pub fn simulate(value: f64, dream: &Dream, model: &ImpactModel) -> Result<SimulationResult> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::invalid("value", value, "must be a positive amount"));
    }

    let days_delayed = model.impact_days(-value, dream.target_value)?.abs();

    Ok(SimulationResult {
        value,
        days_delayed,
        recommendation: Recommendation::for_value(value),
        what_could_be_done: vec![
            format!("Adiantar {} dias na sua meta", days_delayed),
            "Criar uma reserva de emergência".to_string(),
            "Investir em educação ou desenvolvimento pessoal".to_string(),
            "Fazer uma doação para uma causa importante".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dream() -> Dream {
        Dream::new("Notebook", 3650.0, 400.0).unwrap()
    }

    #[test]
    fn test_days_delayed() {
        let r = simulate(120.0, &dream(), &ImpactModel::default()).unwrap();
        assert_eq!(r.days_delayed, 12);
        assert_eq!(r.what_could_be_done[0], "Adiantar 12 dias na sua meta");
    }

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(Recommendation::for_value(100.01), Recommendation::WaitADay);
        assert_eq!(Recommendation::for_value(100.0), Recommendation::ConsiderCheaper);
        assert_eq!(Recommendation::for_value(50.01), Recommendation::ConsiderCheaper);
        assert_eq!(Recommendation::for_value(50.0), Recommendation::Reasonable);
        assert_eq!(Recommendation::for_value(5.0), Recommendation::Reasonable);
    }

    #[test]
    fn test_rejects_non_positive_value() {
        let model = ImpactModel::default();
        assert!(simulate(0.0, &dream(), &model).is_err());
        assert!(simulate(-10.0, &dream(), &model).is_err());
        assert!(simulate(f64::NAN, &dream(), &model).is_err());
    }
}
