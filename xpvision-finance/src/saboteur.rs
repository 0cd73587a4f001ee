//! Saboteur Map: groups expenses by spending category so the user can see
//! what delays their dream the most.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use xpvision_core::{SpendCategory, Transaction};

use crate::category_rules::resolve_category;

/// Aggregated spend for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: SpendCategory,
    /// Sum of absolute amounts
    pub total: f64,
    pub count: usize,
    /// Sum of absolute impact days
    pub days_lost: i64,
}

/// Expense summaries, sorted by total descending. Ties keep the order in
/// which categories were first seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaboteurMap {
    pub categories: Vec<CategorySummary>,
    #[serde(skip)]
    expenses: Vec<Transaction>,
}

impl SaboteurMap {
    /// Build the map from tagged transactions. Income is ignored.
    pub fn build(txns: &[Transaction]) -> Self {
        let expenses: Vec<Transaction> = txns.iter().filter(|t| t.is_expense()).cloned().collect();

        let mut categories: Vec<CategorySummary> = Vec::new();
        for t in &expenses {
            let category = resolve_category(&t.description, &t.category, t.emotion_tag, t.is_bet);
            let idx = match categories.iter().position(|c| c.category == category) {
                Some(i) => i,
                None => {
                    categories.push(CategorySummary {
                        category,
                        total: 0.0,
                        count: 0,
                        days_lost: 0,
                    });
                    categories.len() - 1
                }
            };
            let entry = &mut categories[idx];
            entry.total += t.abs_amount();
            entry.count += 1;
            entry.days_lost += t.impact_days.abs();
        }

        // stable: equal totals stay in first-seen order
        categories.sort_by(|a, b| b.total.total_cmp(&a.total));

        log::debug!(
            "saboteur map: {} expenses in {} categories",
            expenses.len(),
            categories.len()
        );

        Self { categories, expenses }
    }

    /// The category with the largest spend
    pub fn most_critical(&self) -> Option<&CategorySummary> {
        self.categories.first()
    }

    pub fn get(&self, category: SpendCategory) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Spend since the first day of `today`'s month
    pub fn month_total(&self, today: NaiveDate) -> f64 {
        self.this_month(today).map(Transaction::abs_amount).sum()
    }

    /// Days lost since the first day of `today`'s month
    pub fn month_days_lost(&self, today: NaiveDate) -> i64 {
        self.this_month(today).map(|t| t.impact_days.abs()).sum()
    }

    fn this_month(&self, today: NaiveDate) -> impl Iterator<Item = &Transaction> {
        let start = month_start(today);
        self.expenses.iter().filter(move |t| t.date >= start)
    }
}

/// First day of the month containing `day`
pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpvision_core::EmotionTag;

    fn txn(day: u32, amount: f64, category: &str, description: &str, impact: i64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        let mut t = Transaction::new(format!("t{day}"), date, amount, category, description);
        t.impact_days = impact;
        t
    }

    #[test]
    fn test_groups_and_sorts_by_total() {
        let mut bet = txn(2, -200.0, "Lazer", "Blaze", -20);
        bet.is_bet = true;
        let txns = vec![
            txn(1, -45.0, "Delivery - iFood", "Almoço", -5),
            txn(3, -35.0, "iFood", "Jantar", -4),
            bet,
            txn(4, -25.0, "Transporte", "Uber", -3),
        ];

        let map = SaboteurMap::build(&txns);
        assert_eq!(map.categories.len(), 3);
        assert_eq!(map.most_critical().unwrap().category, SpendCategory::Bets);

        let delivery = map.get(SpendCategory::Delivery).unwrap();
        assert_eq!(delivery.total, 80.0);
        assert_eq!(delivery.count, 2);
        assert_eq!(delivery.days_lost, 9);

        for w in map.categories.windows(2) {
            assert!(w[0].total >= w[1].total, "summaries not sorted by total");
        }
    }

    #[test]
    fn test_tied_totals_keep_first_seen_order() {
        let txns = vec![
            txn(1, -50.0, "Transporte", "Uber", -5),
            txn(2, -50.0, "Delivery", "iFood", -5),
            txn(3, -50.0, "Assinatura", "Spotify", -5),
            txn(4, -50.0, "Outros", "Café", -5),
        ];
        let expected = [
            SpendCategory::Transport,
            SpendCategory::Delivery,
            SpendCategory::Subscriptions,
            SpendCategory::Other,
        ];

        for _ in 0..50 {
            let map = SaboteurMap::build(&txns);
            assert_eq!(map.most_critical().unwrap().category, SpendCategory::Transport);
            let order: Vec<_> = map.categories.iter().map(|c| c.category).collect();
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn test_income_is_ignored() {
        let txns = vec![txn(1, 1000.0, "Salário", "Pagamento", 100), txn(2, -10.0, "Outros", "Café", -1)];
        let map = SaboteurMap::build(&txns);
        assert_eq!(map.categories.len(), 1);
        assert_eq!(map.categories[0].category, SpendCategory::Other);
        assert_eq!(map.categories[0].total, 10.0);
    }

    #[test]
    fn test_impulsive_bucket() {
        let t = txn(5, -150.0, "Compras", "Camiseta", -15).with_emotion(EmotionTag::Impulsive);
        let map = SaboteurMap::build(&[t]);
        assert_eq!(map.most_critical().unwrap().category, SpendCategory::ImpulsePurchases);
    }

    #[test]
    fn test_month_totals_skip_older_expenses() {
        let old = {
            let mut t = txn(1, -500.0, "Outros", "Geladeira", -50);
            t.date = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
            t
        };
        let txns = vec![old, txn(1, -30.0, "Outros", "Farmácia", -3), txn(15, -20.0, "Uber", "Corrida", -2)];
        let map = SaboteurMap::build(&txns);
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        assert_eq!(map.month_total(today), 50.0);
        assert_eq!(map.month_days_lost(today), 5);
    }

    #[test]
    fn test_json_output_is_categories_only() {
        let map = SaboteurMap::build(&[txn(2, -30.0, "Uber", "Corrida", -3)]);
        let v = serde_json::to_value(&map).unwrap();
        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["categories"]);
        assert_eq!(v["categories"][0]["total"], 30.0);
    }

    #[test]
    fn test_empty_map() {
        let map = SaboteurMap::build(&[]);
        assert!(map.most_critical().is_none());
        assert_eq!(map.month_total(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), 0.0);
    }
}
