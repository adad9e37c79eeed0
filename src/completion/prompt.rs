/// System-role message sent with every extraction request.
pub const SYSTEM_PROMPT: &str = "Parse the wedding voucher data into JSON format.";

/// Fixed instructions appended after the page text.
pub const INSTRUCTION_BLOCK: &str = r#"Extract the required wedding data from the given text and return it in pure JSON format, without any additional text. Ensure that the output follows this exact JSON structure:

{
    "thumbnail": "",
    "groom": "",
    "bride": "",
    "datetime": "", // ISO-8601 local date-time without timezone, ex: 2025-04-26T14:00:00
    "location": ""
}

Do not include any explanations, comments, or extra characters. Only return valid JSON."#;

/// Page text, a blank line, then the instructions.
///
/// With no page text the prompt is the instruction block alone.
pub fn build_prompt(canonical_text: &str) -> String {
    if canonical_text.is_empty() {
        return INSTRUCTION_BLOCK.to_string();
    }
    format!("{canonical_text}\n\n{INSTRUCTION_BLOCK}")
}
