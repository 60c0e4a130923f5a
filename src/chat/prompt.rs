//! System instruction and provider prompt assembly.

use crate::completion::ProviderMessage;
use crate::types::message::{sanitize_history, ChatMessage};

/// Standing instruction prepended to every exchange.
pub const SYSTEM_PROMPT: &str = "\
You are the trip-planning assistant of Voyage, a cruise booking marketplace. \
Help travelers find a cruise that fits what they describe. \
When the traveler mentions concrete preferences such as a destination, a budget, \
a trip length or a vibe, call the search_cruises function to look up matching \
cruises instead of guessing. \
When search results are provided, recommend cruises from those results only, \
refer to them by name, and briefly say why each one fits. \
If the search found nothing, say so honestly and suggest loosening one constraint. \
Keep answers short, warm and concrete. Never invent cruises, prices or dates.";

/// Builds the provider-facing message list: the system instruction plus
/// the usable client turns (empty and non-user/assistant turns dropped).
pub fn build_prompt(history: &[ChatMessage]) -> Vec<ProviderMessage> {
    let mut messages = vec![ProviderMessage::system(SYSTEM_PROMPT)];
    messages.extend(sanitize_history(history).into_iter().map(ProviderMessage::from));
    messages
}
