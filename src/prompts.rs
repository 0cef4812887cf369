//! The fixed instruction string sent alongside the page images.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the relay client and the integration tests
//!    both reference this constant, so "the prompt was sent unmodified" is
//!    checkable by identity rather than by eye.
//!
//! 2. **Testability** — tests can assert on the exact bytes without spinning
//!    up a model.
//!
//! The text is a behavioural contract with the vision model: it pins the
//! output format (Markdown bolding for question stems, `[Unclear Text]` for
//! illegible spans, original line breaks, no translation). The bold-detection
//! heuristic in [`crate::export::layout`] depends on the model honouring it,
//! so treat edits here as format migrations.

/// Instruction string for extracting bilingual Hindi/English question text
/// from scanned page images. Sent verbatim with every extraction request.
pub const EXTRACTION_PROMPT: &str = "You are an advanced OCR-driven text extraction system. Your task is to extract clean, accurate, and structured text from the following page images from a scanned PDF document that contains questions written in both Hindi and English. Follow these instructions carefully: 1. OCR & Language Handling: Detect and read text from the scanned (image-based) PDF pages. Automatically identify Hindi (Devanagari script) and English text. Extract both languages accurately. Preserve the original order of questions and content as it appears on the page. 2. Output Format: Produce a single, clean block of text. Use Markdown for bolding. 3. Cleaning & Accuracy Requirements: Remove digital noise, watermarks, and artifacts from crooked scans. Correct common OCR mistakes (e.g., misread characters in Devanagari or English). Ensure question numbers and any sub-numbering (a, b, c, i, ii, iii) remain intact and are correctly associated with their questions. **Bold only the question statements.** Do not bold the options (e.g., (A), (B), (C), (D)). Do NOT translate any text; extract it exactly as it is written in its original language. 4. Special Requirements: Maintain line breaks and paragraph structure as in the original document to separate questions and options clearly. If any part of the text is completely unreadable or illegible, mark it as: [Unclear Text]. Do not merge Hindi and English questions into one, even if they are parallel translations of each other on the page. List them sequentially as they appear. 5. Final Output: Provide the output as structured, machine-readable, and cleanly formatted text, ready for use in a question-paper analyzer system. Begin extraction now from the provided images.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_pins_the_output_contract() {
        // The export heuristic depends on these exact instructions.
        assert!(EXTRACTION_PROMPT.contains("Use Markdown for bolding"));
        assert!(EXTRACTION_PROMPT.contains("[Unclear Text]"));
        assert!(EXTRACTION_PROMPT.contains("Do NOT translate"));
    }
}
