//! Transaction record types and the closed set of spending categories

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::impact::RealityTrigger;

/// A logged transaction, tagged with bet and impact metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier for this record
    pub id: String,
    /// Date the transaction was logged
    pub date: NaiveDate,
    /// Positive = income/deposit, negative = expense
    pub amount: f64,
    /// Free-text category typed by the user ("Delivery - iFood")
    pub category: String,
    /// Free-text description ("Bet365 - Futebol")
    pub description: String,
    /// Set by bet detection
    pub is_bet: bool,
    /// Signed days: negative delays the dream, positive advances it
    pub impact_days: i64,
    /// User-assigned; never computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_tag: Option<EmotionTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality_trigger: Option<RealityTrigger>,
}

impl Transaction {
    /// Create an untagged transaction (no bet flag, zero impact)
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            category: category.into(),
            description: description.into(),
            is_bet: false,
            impact_days: 0,
            emotion_tag: None,
            reality_trigger: None,
        }
    }

    pub fn with_emotion(mut self, tag: EmotionTag) -> Self {
        self.emotion_tag = Some(tag);
        self
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// How the user felt about a purchase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EmotionTag {
    #[serde(rename = "necessary")]
    Necessary,
    #[serde(rename = "conscious_pleasure")]
    ConsciousPleasure,
    #[serde(rename = "impulsive")]
    Impulsive,
    #[serde(rename = "investment")]
    Investment,
}

impl EmotionTag {
    /// Parse the stored tag name (`"impulsive"`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "necessary" => Some(EmotionTag::Necessary),
            "conscious_pleasure" => Some(EmotionTag::ConsciousPleasure),
            "impulsive" => Some(EmotionTag::Impulsive),
            "investment" => Some(EmotionTag::Investment),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            EmotionTag::Necessary => "necessary",
            EmotionTag::ConsciousPleasure => "conscious_pleasure",
            EmotionTag::Impulsive => "impulsive",
            EmotionTag::Investment => "investment",
        }
    }
}

/// Spending categories resolved by the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpendCategory {
    #[serde(rename = "bets")]
    Bets,
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "subscriptions")]
    Subscriptions,
    #[serde(rename = "impulse-purchases")]
    ImpulsePurchases,
    #[serde(rename = "other")]
    Other,
}

impl SpendCategory {
    /// Display name shown to users
    pub fn name(&self) -> &'static str {
        match self {
            SpendCategory::Bets => "Apostas",
            SpendCategory::Delivery => "Delivery",
            SpendCategory::Transport => "Transporte",
            SpendCategory::Subscriptions => "Assinaturas",
            SpendCategory::ImpulsePurchases => "Compras Impulsivas",
            SpendCategory::Other => "Outros",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SpendCategory::Bets => "🎲",
            SpendCategory::Delivery => "🍔",
            SpendCategory::Transport => "🚗",
            SpendCategory::Subscriptions => "📱",
            SpendCategory::ImpulsePurchases => "😵",
            SpendCategory::Other => "📦",
        }
    }

    /// Categories worth a reality trigger when spent on
    pub fn is_discretionary(&self) -> bool {
        matches!(self, SpendCategory::Bets | SpendCategory::ImpulsePurchases)
    }
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
