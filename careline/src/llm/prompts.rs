//! Built-in prompt and fallback text for the care chat assistant.

/// Reply returned whenever the upstream call fails or produces no usable
/// content. The widget shows this verbatim, so it stays conversational.
pub const FALLBACK_REPLY: &str =
    "Sorry, I could not process that right now. Please call (302) 446-3986 or submit the care form.";

/// Default persona and policy prompt, used when `CHAT_SYSTEM_PROMPT` is
/// not configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are the assistant for Phyllis Home Care, a non-medical in-home care company.
Key facts:
- Services: companion care, personal care (ADLs), memory care support, respite/short-term help, 24/7 and live-in coverage.
- Service area: Greater Metro and suburbs (call to confirm specific ZIPs).
- Phone: (302) 446-3986. Encourage calling for urgent needs or scheduling.
- Response time: under 15 minutes during business hours.
- Do NOT request or store medical/health/PHI details. Keep conversations general and privacy-safe.
- If conversation turns medical, politely decline and suggest speaking with a clinician; for emergencies, advise calling local emergency services.
- Keep answers concise and action-oriented. Offer to connect by phone or the online care form.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_mentions_phone_and_form() {
        assert!(FALLBACK_REPLY.contains("(302) 446-3986"));
        assert!(FALLBACK_REPLY.contains("care form"));
    }

    #[test]
    fn default_prompt_carries_privacy_rule() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("PHI"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Phyllis Home Care"));
    }
}
