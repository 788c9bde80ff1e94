// src/persona/mod.rs
// Persona system for ROY's personality.
// Currently only Roy is implemented; the enum stays so the "Mood Into Art"
// companion voice can slot in later without touching the prompt pipeline.

pub mod roy;

pub use roy::ROY_PERSONA_PROMPT;

/// Persona overlays define the companion's base personality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaOverlay {
    Roy,
}

impl PersonaOverlay {
    /// Returns the system prompt for this persona overlay.
    pub fn prompt(&self) -> &'static str {
        match self {
            PersonaOverlay::Roy => ROY_PERSONA_PROMPT,
        }
    }
}

impl std::fmt::Display for PersonaOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PersonaOverlay::Roy => "roy",
            }
        )
    }
}

impl std::str::FromStr for PersonaOverlay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "roy" => Ok(PersonaOverlay::Roy),
            _ => Err(()),
        }
    }
}
