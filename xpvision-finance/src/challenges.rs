//! Savings challenges ("7 dias sem aposta", ...) and their progress.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    #[serde(rename = "no_ifood")]
    NoIfood,
    #[serde(rename = "no_bet")]
    NoBet,
    #[serde(rename = "save_money")]
    SaveMoney,
    #[serde(rename = "custom")]
    Custom,
}

/// Built-in challenge definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeTemplate {
    pub kind: ChallengeKind,
    pub title: &'static str,
    pub description: &'static str,
    pub target: f64,
}

pub const TEMPLATES: &[ChallengeTemplate] = &[
    ChallengeTemplate {
        kind: ChallengeKind::NoIfood,
        title: "3 dias sem iFood",
        description: "Fique 3 dias sem pedir delivery",
        target: 3.0,
    },
    ChallengeTemplate {
        kind: ChallengeKind::NoBet,
        title: "7 dias sem aposta",
        description: "Fique uma semana sem apostar",
        target: 7.0,
    },
    ChallengeTemplate {
        kind: ChallengeKind::SaveMoney,
        title: "Guardar R$ 30 essa semana",
        description: "Economize R$ 30 até o final da semana",
        target: 30.0,
    },
];

impl ChallengeKind {
    pub fn template(&self) -> Option<&'static ChallengeTemplate> {
        TEMPLATES.iter().find(|t| t.kind == *self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub kind: ChallengeKind,
    pub progress: f64,
    pub target: f64,
    pub completed: bool,
}

/// Outcome of advancing a challenge
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeUpdate {
    pub challenge: Challenge,
    /// True only on the update that crossed the target
    pub just_completed: bool,
}

impl Challenge {
    /// Start a challenge from its built-in template; `Custom` has none
    pub fn start(kind: ChallengeKind) -> Option<Self> {
        kind.template().map(|t| Self::custom(kind, t.target))
    }

    pub fn custom(kind: ChallengeKind, target: f64) -> Self {
        Self {
            kind,
            progress: 0.0,
            target,
            completed: false,
        }
    }

    /// Add progress, clamped to the target
    pub fn advance(&self, increment: f64) -> ChallengeUpdate {
        let progress = (self.progress + increment).min(self.target);
        let completed = progress >= self.target;
        ChallengeUpdate {
            just_completed: completed && !self.completed,
            challenge: Self {
                progress,
                completed,
                ..self.clone()
            },
        }
    }

    /// Progress as 0-100
    pub fn percentage(&self) -> f64 {
        if self.target <= 0.0 {
            return 100.0;
        }
        (self.progress / self.target * 100.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        let c = Challenge::start(ChallengeKind::NoBet).unwrap();
        assert_eq!(c.target, 7.0);
        assert!(Challenge::start(ChallengeKind::Custom).is_none());
    }

    #[test]
    fn test_advance_clamps_and_completes_once() {
        let c = Challenge::start(ChallengeKind::NoIfood).unwrap();
        let step = c.advance(2.0);
        assert!(!step.just_completed);
        assert_eq!(step.challenge.percentage(), 2.0 / 3.0 * 100.0);

        let done = step.challenge.advance(5.0);
        assert!(done.just_completed);
        assert!(done.challenge.completed);
        assert_eq!(done.challenge.progress, 3.0);
        assert_eq!(done.challenge.percentage(), 100.0);

        let again = done.challenge.advance(1.0);
        assert!(!again.just_completed);
        assert!(again.challenge.completed);
    }
}
