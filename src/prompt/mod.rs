// src/prompt/mod.rs

mod builder;

pub use builder::{build_conversation_context, build_system_prompt, tone_modifier, WRAP_UP_NOTICE};
