// src/prompt/builder.rs

use crate::classifier::EmotionalState;
use crate::persona::PersonaOverlay;
use crate::session::{SessionSnapshot, Turn};

/// Appended once a session crosses the wrap-up threshold, to bias the
/// downstream generator toward closing the conversation gracefully.
pub const WRAP_UP_NOTICE: &str = "This session is approaching its end. Begin \
gently steering the conversation toward closure: reflect on what was \
discussed, reinforce one concrete takeaway, and avoid opening new heavy \
topics.";

/// One fixed tone-modifier phrase per emotional category. `Unknown`
/// contributes nothing.
pub fn tone_modifier(state: EmotionalState) -> &'static str {
    match state {
        EmotionalState::Depressed => {
            "The user sounds depressed. Be steady and present, take their \
             weight seriously, and do not paper over it with cheerfulness."
        }
        EmotionalState::Anxious => {
            "The user sounds anxious. Slow the pace, ground the conversation \
             in specifics, and help them separate what they can control from \
             what they cannot."
        }
        EmotionalState::Angry => {
            "The user sounds angry. Let them vent without judgment, \
             acknowledge the legitimacy of the feeling, and only then probe \
             what sits underneath it."
        }
        EmotionalState::Philosophical => {
            "The user is in a reflective mood. Meet them there - engage with \
             the big questions directly and bring in ideas worth chewing on."
        }
        EmotionalState::Positive => {
            "The user is in good spirits. Match their energy, celebrate what \
             is going well, and use the momentum to consolidate progress."
        }
        EmotionalState::Unknown => "",
    }
}

/// Builds the complete system prompt: persona, caller-declared stressors,
/// tone adaptation, accumulated topics, and the wrap-up notice once the
/// session crosses `wrap_up_after_minutes`.
///
/// Deterministic for identical inputs - no clock reads, no randomness - so
/// composed prompts are reproducible in tests.
pub fn build_system_prompt(
    persona: &PersonaOverlay,
    stressors: &[String],
    snapshot: &SessionSnapshot,
    wrap_up_after_minutes: i64,
) -> String {
    let mut prompt = String::new();

    // 1. Core persona prompt
    prompt.push_str(persona.prompt().trim());
    prompt.push_str("\n\n");

    // 2. Stressors the user declared up front
    if !stressors.is_empty() {
        prompt.push_str(&format!(
            "The user has indicated these stressors: {}.\n\n",
            stressors.join(", ")
        ));
    }

    // 3. Tone adaptation from the inferred emotional state
    let tone = tone_modifier(snapshot.emotional_state);
    if !tone.is_empty() {
        prompt.push_str(tone);
        prompt.push_str("\n\n");
    }

    // 4. Topics accumulated so far (BTreeSet keeps this ordering stable)
    if !snapshot.topics.is_empty() {
        let topics: Vec<&str> = snapshot.topics.iter().copied().collect();
        prompt.push_str(&format!(
            "Themes the user has raised this session: {}. Weave them in \
             where they fit; do not recite the list.\n\n",
            topics.join(", ")
        ));
    }

    // 5. Time boundary
    if snapshot.elapsed_minutes >= wrap_up_after_minutes {
        prompt.push_str(WRAP_UP_NOTICE);
        prompt.push_str("\n\n");
    }

    prompt.push_str(
        "Remember: you are ROY. Never break character. Never use assistant \
         language.",
    );

    prompt
}

/// Builds a condensed context string from recent turns for token efficiency
pub fn build_conversation_context(history: &[Turn], max_messages: usize) -> String {
    let start_idx = history.len().saturating_sub(max_messages);

    history[start_idx..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role.as_str(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}
