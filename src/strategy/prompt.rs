//! Fixed instructions for outline generation.

use crate::brief::format_instructions;
use crate::provider::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are an expert content strategist specializing in SEO-optimized article outlines.
Create a comprehensive, well-structured outline that:

1. Targets the primary keyword naturally throughout
2. Incorporates secondary and LSI keywords strategically
3. Addresses search intent and user needs
4. Covers competitor gaps and unique angles
5. Includes actionable, specific section titles
6. Maps People Also Ask questions to relevant sections or FAQs

Focus on creating content that provides genuine value while being optimized for search visibility.";

const REQUIREMENTS: &str = "REQUIREMENTS:
- Create engaging, specific section titles (not generic)
- Ensure each section targets relevant keywords naturally
- Include practical subsections with actionable information
- Address content gaps identified from competitor analysis
- Create FAQ section from People Also Ask data
- Provide brief research notes for each section";

/// User instruction embedding the context block and the brief format instructions.
pub fn user_prompt(context: &str) -> String {
    format!(
        "Based on the following research context, create a detailed content outline:\n\n{}\n\n{}\n\n{}",
        context,
        REQUIREMENTS,
        format_instructions()
    )
}

/// System and user messages for one outline request.
///
/// Constrained and unconstrained requests share these messages; they differ
/// only in whether a response schema travels with the options.
pub fn outline_messages(context: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt(context))]
}
