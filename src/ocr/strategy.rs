//! Prompt strategies for text extraction.
//!
//! Each strategy is a fixed instruction template. Templates are data: they
//! are never mutated per call, so the same strategy always yields the same
//! prompt bytes.

use std::fmt;
use std::str::FromStr;

/// Named prompt template controlling how the model reads the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Plain-text extraction in visual order, no markdown tables.
    General,
    /// Table-aware extraction that still emits plain text.
    Table,
    /// Exhaustive extraction with emphasis on small text and footnotes.
    Detailed,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::General, Strategy::Table, Strategy::Detailed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::General => "general",
            Strategy::Table => "table",
            Strategy::Detailed => "detailed",
        }
    }

    /// The instruction template for this strategy.
    pub fn prompt(&self) -> &'static str {
        match self {
            Strategy::General => GENERAL_PROMPT,
            Strategy::Table => TABLE_PROMPT,
            Strategy::Detailed => DETAILED_PROMPT,
        }
    }

    /// Strategy used for the backup sweep once `self` has failed on every model.
    ///
    /// Only TABLE and DETAILED swap with each other; everything else falls
    /// back to DETAILED.
    pub fn backup(&self) -> Strategy {
        match self {
            Strategy::Table => Strategy::Detailed,
            Strategy::Detailed => Strategy::Table,
            Strategy::General => Strategy::Detailed,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Strategy::General),
            "table" => Ok(Strategy::Table),
            "detailed" => Ok(Strategy::Detailed),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

const TABLE_PROMPT: &str = r#"Read this Korean document image COMPLETELY and extract ALL text in EXACT VISUAL ORDER from top to bottom, left to right.

CRITICAL READING ORDER REQUIREMENTS:
- Follow the EXACT visual layout order - do NOT rearrange content
- Read from TOP to BOTTOM, LEFT to RIGHT as it appears visually
- Maintain the ORIGINAL sequence of all elements as they appear in the image
- Do NOT move paragraphs to the end - keep them in their visual position
- Do NOT group similar content types together - follow visual order

EXTRACTION REQUIREMENTS:
- Extract EVERY word, number, and symbol visible
- Output as plain text only (no table formatting)
- Include ALL Korean text, English text, numbers, and symbols
- Include ALL options (①, ②, ③, ④, ⑤) and their descriptions
- Include ALL explanatory paragraphs exactly where they appear visually
- Include ALL legal references and guidelines in their visual position

STRICT VISUAL ORDER PROCESS:
1. Start from the very top of the image
2. Read line by line, section by section as they appear
3. When you encounter a table, read it completely before moving to next visual element
4. When you encounter paragraph text, include it immediately in that position
5. Continue down the image maintaining exact visual sequence
6. Do NOT reorganize or reorder any content

CRITICAL: Keep ALL explanatory paragraphs in their EXACT visual position - do NOT move them to the end.

COMPLETENESS GUARANTEE:
- Continue reading until you have extracted EVERY SINGLE piece of text
- Do NOT stop until you reach the very bottom of the document
- Include ALL footnotes, references, and small text at the bottom
- Extract the COMPLETE document including every explanatory paragraph

Extract everything maintaining perfect visual order and COMPLETE content:"#;

const DETAILED_PROMPT: &str = r#"Extract ALL text from this Korean document in EXACT VISUAL ORDER.

CRITICAL VISUAL ORDER REQUIREMENTS:
1. Follow EXACT visual layout - do NOT rearrange any content
2. Read strictly from TOP to BOTTOM, LEFT to RIGHT as it appears
3. Maintain ORIGINAL sequence of all elements
4. Do NOT move any paragraphs or sections to different positions
5. Keep all explanatory text in its EXACT visual position

EXTRACTION REQUIREMENTS:
- Read EVERY piece of text in the document
- Include text in tables, headers, body content, and footnotes
- Pay attention to small text and numbers
- Read Korean characters accurately
- Include all punctuation, numbers, and special characters
- Use appropriate line breaks to separate sections
- Be completely comprehensive

STRICT PROCESS:
- Start from the very top of the image
- Read each visual element as you encounter it
- Do NOT skip ahead or reorganize content
- Maintain perfect sequential order

Extract ALL text maintaining exact visual order:"#;

const GENERAL_PROMPT: &str = r#"Extract all Korean and English text from this image in EXACT VISUAL ORDER.

VISUAL ORDER REQUIREMENTS:
1. Follow the EXACT visual layout from top to bottom, left to right
2. Do NOT rearrange or reorder any content
3. Maintain the ORIGINAL position and sequence of all text
4. Keep paragraphs and sections in their visual position

FORMATTING REQUIREMENTS:
1. Output as plain text only (no table symbols like |, ---)
2. Use appropriate line breaks and paragraph separations
3. Accurately recognize numbers, symbols, and special characters
4. Extract both Korean and English text accurately
5. Do NOT use markdown table format
6. Preserve the logical structure and hierarchy

CRITICAL: Read in exact visual order - do NOT move any content to different positions.

Output only the extracted text maintaining perfect visual sequence:"#;
