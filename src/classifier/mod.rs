// src/classifier/mod.rs
//! Rule-based emotion and topic classification.
//!
//! Matching is plain lower-cased substring containment against fixed keyword
//! tables. Emotion groups are evaluated in a fixed order and the first group
//! with a hit wins, so the order in `EMOTION_RULES` is the tie-break rule:
//! distress states are checked before reflective and positive ones. Topic
//! groups have no such ordering; every matching topic is collected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Emotional category inferred from the most recently matched message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Depressed,
    Anxious,
    Angry,
    Philosophical,
    Positive,
    #[default]
    Unknown,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Depressed => "depressed",
            EmotionalState::Anxious => "anxious",
            EmotionalState::Angry => "angry",
            EmotionalState::Philosophical => "philosophical",
            EmotionalState::Positive => "positive",
            EmotionalState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EmotionalState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "depressed" => Ok(EmotionalState::Depressed),
            "anxious" => Ok(EmotionalState::Anxious),
            "angry" => Ok(EmotionalState::Angry),
            "philosophical" => Ok(EmotionalState::Philosophical),
            "positive" => Ok(EmotionalState::Positive),
            "unknown" => Ok(EmotionalState::Unknown),
            _ => Err(()),
        }
    }
}

/// Ordered emotion keyword groups. First matching group wins, so a message
/// carrying both "hopeless" and "happy" classifies as depressed.
pub const EMOTION_RULES: &[(EmotionalState, &[&str])] = &[
    (
        EmotionalState::Depressed,
        &[
            "depress",
            "hopeless",
            "worthless",
            "empty inside",
            "numb",
            "no point",
            "can't go on",
        ],
    ),
    (
        EmotionalState::Anxious,
        &[
            "anxious",
            "anxiety",
            "worried",
            "worry",
            "nervous",
            "panic",
            "overwhelmed",
            "stress",
        ],
    ),
    (
        EmotionalState::Angry,
        &["angry", "furious", "pissed", "frustrated", "fed up", "hate"],
    ),
    (
        EmotionalState::Philosophical,
        &[
            "meaning",
            "purpose",
            "existence",
            "philosophy",
            "mortality",
            "universe",
        ],
    ),
    (
        EmotionalState::Positive,
        &[
            "happy",
            "grateful",
            "excited",
            "hopeful",
            "wonderful",
            "optimistic",
            "proud",
        ],
    ),
];

/// Topic vocabulary. Unlike emotions, every matching topic is added.
pub const TOPIC_RULES: &[(&str, &[&str])] = &[
    (
        "work",
        &["work", "job", "boss", "career", "coworker", "deadline", "office"],
    ),
    (
        "relationships",
        &[
            "relationship",
            "partner",
            "girlfriend",
            "boyfriend",
            "wife",
            "husband",
            "friend",
            "family",
            "lonely",
            "breakup",
            "divorce",
        ],
    ),
    (
        "health",
        &[
            "health", "sick", "doctor", "sleep", "tired", "pain", "therapy",
            "medication",
        ],
    ),
    (
        "finance",
        &[
            "money",
            "debt",
            "rent",
            "bills",
            "finance",
            "financial",
            "broke",
            "afford",
            "salary",
        ],
    ),
];

/// Result of classifying one message against the keyword tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// First emotion group with a keyword hit, or the prior state when
    /// nothing matched.
    pub emotional_state: EmotionalState,
    /// Every topic with a keyword hit. The session store unions these into
    /// the accumulated set.
    pub topics: BTreeSet<&'static str>,
}

/// Classify one raw message. Empty or whitespace-only input is a no-op, not
/// an error: the prior emotional state is returned and no topics are added.
pub fn classify(text: &str, prior: EmotionalState) -> Classification {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Classification {
            emotional_state: prior,
            topics: BTreeSet::new(),
        };
    }

    let lowered = trimmed.to_lowercase();

    let emotional_state = EMOTION_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(state, _)| *state)
        .unwrap_or(prior);

    let topics = TOPIC_RULES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(topic, _)| *topic)
        .collect();

    Classification {
        emotional_state,
        topics,
    }
}
