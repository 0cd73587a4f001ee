//! Tagging pipeline: raw transactions in, classified transactions with day
//! impact (and reality triggers for discretionary spend) out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use xpvision_core::{Dream, EmotionTag, ImpactModel, Result, Transaction};

use crate::category_rules::classify_with_emotion;

/// A transaction as the user typed it, before any derived fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub emotion_tag: Option<EmotionTag>,
}

/// Stamps bet flag, impact days and reality triggers against one dream
pub struct TransactionTagger<'a> {
    model: ImpactModel,
    dream: &'a Dream,
}

impl<'a> TransactionTagger<'a> {
    pub fn new(model: ImpactModel, dream: &'a Dream) -> Self {
        Self { model, dream }
    }

    pub fn tag(&self, id: impl Into<String>, raw: &RawTransaction) -> Result<Transaction> {
        let class = classify_with_emotion(&raw.description, &raw.category, raw.emotion_tag);
        let impact_days = self.model.impact_days(raw.amount, self.dream.target_value)?;

        let reality_trigger = if raw.amount < 0.0 && class.category.is_discretionary() {
            Some(self.model.reality_trigger(
                raw.amount,
                self.dream.target_value,
                self.dream.current_saved,
            )?)
        } else {
            None
        };

        if class.is_bet {
            log::info!(
                "bet detected: {:?} ({:.2}) delays '{}' by {} days",
                raw.description,
                raw.amount,
                self.dream.title,
                impact_days.abs()
            );
        }

        Ok(Transaction {
            id: id.into(),
            date: raw.date,
            amount: raw.amount,
            category: raw.category.clone(),
            description: raw.description.clone(),
            is_bet: class.is_bet,
            impact_days,
            emotion_tag: raw.emotion_tag,
            reality_trigger,
        })
    }

    /// Tag a batch, numbering ids `txn-0000`, `txn-0001`, ...
    pub fn tag_all(&self, raws: &[RawTransaction]) -> Result<Vec<Transaction>> {
        raws.iter()
            .enumerate()
            .map(|(i, raw)| self.tag(format!("txn-{:04}", i), raw))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(description: &str, amount: f64, category: &str) -> RawTransaction {
        RawTransaction {
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            description: description.to_string(),
            amount,
            category: category.to_string(),
            emotion_tag: None,
        }
    }

    #[test]
    fn test_bet_gets_trigger() {
        let dream = Dream::new("Viagem", 3650.0, 0.0).unwrap();
        let tagger = TransactionTagger::new(ImpactModel::default(), &dream);
        let txn = tagger.tag("t1", &raw("Bet365 - Futebol", -120.0, "Aposta")).unwrap();

        assert!(txn.is_bet);
        assert_eq!(txn.impact_days, -12);
        let trigger = txn.reality_trigger.expect("bets carry a reality trigger");
        assert_eq!(trigger.meals_equivalent, 8);
        assert_eq!(trigger.dream_days_lost, 12);
    }

    #[test]
    fn test_delivery_has_impact_but_no_trigger() {
        let dream = Dream::new("Viagem", 3650.0, 0.0).unwrap();
        let tagger = TransactionTagger::new(ImpactModel::default(), &dream);
        let txn = tagger.tag("t2", &raw("iFood - Almoço", -45.0, "Delivery - iFood")).unwrap();

        assert!(!txn.is_bet);
        assert_eq!(txn.impact_days, -5); // 4.5 -> 5
        assert!(txn.reality_trigger.is_none());
    }

    #[test]
    fn test_impulsive_expense_gets_trigger() {
        let dream = Dream::new("Viagem", 3650.0, 0.0).unwrap();
        let tagger = TransactionTagger::new(ImpactModel::default(), &dream);
        let mut shoes = raw("Tênis", -320.0, "Compras");
        shoes.emotion_tag = Some(EmotionTag::Impulsive);
        let txn = tagger.tag("t3", &shoes).unwrap();

        assert_eq!(txn.impact_days, -32);
        assert_eq!(txn.emotion_tag, Some(EmotionTag::Impulsive));
        assert_eq!(txn.reality_trigger.unwrap().meals_equivalent, 20);
    }

    #[test]
    fn test_deposit_advances() {
        let dream = Dream::new("Viagem", 3650.0, 0.0).unwrap();
        let tagger = TransactionTagger::new(ImpactModel::default(), &dream);
        let txn = tagger.tag("t4", &raw("Salário", 700.0, "Renda")).unwrap();
        assert_eq!(txn.impact_days, 70);
        assert!(txn.reality_trigger.is_none());
    }

    #[test]
    fn test_tag_all_numbers_ids() {
        let dream = Dream::new("Viagem", 3650.0, 0.0).unwrap();
        let tagger = TransactionTagger::new(ImpactModel::default(), &dream);
        let txns = tagger
            .tag_all(&[raw("Uber", -30.0, "Transporte"), raw("Pix", 50.0, "Renda")])
            .unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].id, "txn-0000");
        assert_eq!(txns[1].id, "txn-0001");
    }
}
