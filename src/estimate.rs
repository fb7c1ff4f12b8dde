//! Prompt-side helpers: per-mode instruction codes and the prompting
//! overhead estimate shown in mode-selection UIs.

use crate::annotation::{Density, RenderMode};
use serde::{Deserialize, Serialize};

/// Fixed system-prompt cost of enabling annotations at all.
const SYSTEM_PROMPT_TOKENS: u32 = 170;

/// Conversation length the per-conversation figure models.
const CONVERSATION_MESSAGES: u32 = 20;

/// Estimated prompting overhead for one mode/density combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub system_prompt_tokens: u32,
    pub per_message_tokens: u32,
    pub estimated_per_conversation_tokens: u32,
}

/// The short code embedded in the upstream instruction prompt to select a
/// mode. The prompt builder never asks for mode None, so it maps to the
/// default highlight code.
pub fn mode_instruction_code(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Underline => "U",
        RenderMode::Both => "B",
        RenderMode::Highlights | RenderMode::None => "HL",
    }
}

/// Pure overhead formula: fixed per-mode table plus a fixed surcharge for an
/// explicit density request, projected over a 20-message conversation.
pub fn estimate_token_cost(mode: RenderMode, density: Density) -> CostEstimate {
    let system_prompt_tokens = match mode {
        RenderMode::None => 0,
        _ => SYSTEM_PROMPT_TOKENS,
    };

    let instruction_tokens = match mode {
        RenderMode::None => 0,
        RenderMode::Underline => 3,
        RenderMode::Highlights => 4,
        RenderMode::Both => 4,
    };

    let density_tokens = match density {
        Density::Auto => 0,
        Density::Explicit => 8,
    };

    let per_message_tokens = instruction_tokens + density_tokens;
    CostEstimate {
        system_prompt_tokens,
        per_message_tokens,
        estimated_per_conversation_tokens: system_prompt_tokens + CONVERSATION_MESSAGES * per_message_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_auto_reference_values() {
        let estimate = estimate_token_cost(RenderMode::Highlights, Density::Auto);
        assert_eq!(estimate.system_prompt_tokens, 170);
        assert_eq!(estimate.per_message_tokens, 4);
        assert_eq!(estimate.estimated_per_conversation_tokens, 250);
    }

    #[test]
    fn none_mode_costs_nothing_at_auto_density() {
        let estimate = estimate_token_cost(RenderMode::None, Density::Auto);
        assert_eq!(estimate.system_prompt_tokens, 0);
        assert_eq!(estimate.per_message_tokens, 0);
        assert_eq!(estimate.estimated_per_conversation_tokens, 0);
    }

    #[test]
    fn explicit_density_adds_per_message_surcharge() {
        let auto = estimate_token_cost(RenderMode::Underline, Density::Auto);
        let explicit = estimate_token_cost(RenderMode::Underline, Density::Explicit);
        assert_eq!(auto.per_message_tokens, 3);
        assert_eq!(explicit.per_message_tokens, 11);
        assert_eq!(explicit.estimated_per_conversation_tokens, 170 + 20 * 11);
    }

    #[test]
    fn instruction_codes() {
        assert_eq!(mode_instruction_code(RenderMode::Underline), "U");
        assert_eq!(mode_instruction_code(RenderMode::Highlights), "HL");
        assert_eq!(mode_instruction_code(RenderMode::Both), "B");
        assert_eq!(mode_instruction_code(RenderMode::None), "HL");
    }
}
