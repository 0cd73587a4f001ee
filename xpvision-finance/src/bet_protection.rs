//! Bet protection: monthly bet spend and the streak since the last bet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use xpvision_core::Transaction;

use crate::saboteur::month_start;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetProtection {
    /// User opted into bet alerts
    pub enabled: bool,
    pub total_bet_month: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_bet_at: Option<NaiveDate>,
}

impl BetProtection {
    /// Summarize bet expenses from tagged transactions
    pub fn from_transactions(txns: &[Transaction], today: NaiveDate, enabled: bool) -> Self {
        let start = month_start(today);
        let bets = || txns.iter().filter(|t| t.is_bet && t.is_expense());

        Self {
            enabled,
            total_bet_month: bets().filter(|t| t.date >= start).map(Transaction::abs_amount).sum(),
            last_bet_at: bets().map(|t| t.date).max(),
        }
    }

    /// Whole days since the last bet, `None` if there never was one
    pub fn days_since_last_bet(&self, today: NaiveDate) -> Option<i64> {
        self.last_bet_at.map(|d| (today - d).num_days().max(0))
    }

    pub fn savings_message(&self) -> String {
        if self.total_bet_month == 0.0 {
            "Nenhuma aposta detectada este mês! 🎉".to_string()
        } else {
            format!("Você gastou R$ {:.2} em apostas este mês.", self.total_bet_month)
        }
    }

    /// Whether a bet alert should be raised for a new transaction
    pub fn should_alert(&self, txn: &Transaction) -> bool {
        self.enabled && txn.is_bet && txn.is_expense()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(y: i32, m: u32, d: u32, amount: f64) -> Transaction {
        let mut t = Transaction::new("b", NaiveDate::from_ymd_opt(y, m, d).unwrap(), amount, "Aposta", "Bet365");
        t.is_bet = true;
        t
    }

    #[test]
    fn test_month_total_and_last_bet() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let txns = vec![bet(2026, 2, 28, -100.0), bet(2026, 3, 5, -50.0), bet(2026, 3, 12, -25.5)];
        let p = BetProtection::from_transactions(&txns, today, true);

        assert_eq!(p.total_bet_month, 75.5);
        assert_eq!(p.last_bet_at, NaiveDate::from_ymd_opt(2026, 3, 12));
        assert_eq!(p.days_since_last_bet(today), Some(8));
        assert_eq!(p.savings_message(), "Você gastou R$ 75.50 em apostas este mês.");
    }

    #[test]
    fn test_no_bets() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let p = BetProtection::from_transactions(&[], today, false);
        assert_eq!(p.total_bet_month, 0.0);
        assert_eq!(p.days_since_last_bet(today), None);
        assert_eq!(p.savings_message(), "Nenhuma aposta detectada este mês! 🎉");
    }

    #[test]
    fn test_alert_requires_opt_in() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let b = bet(2026, 3, 20, -10.0);
        assert!(!BetProtection::from_transactions(&[], today, false).should_alert(&b));
        assert!(BetProtection::from_transactions(&[], today, true).should_alert(&b));
    }
}
