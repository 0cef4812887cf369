//! Pure text layout for the PDF export: bold detection, word-wrap,
//! pagination. No printpdf types appear here, so every property of the
//! export — marker stripping, wrap width, page breaks — is testable without
//! generating a document.
//!
//! The bold heuristic is deliberately narrow: a trimmed line is a
//! heading/bold line iff it starts and ends with the two-character `**`
//! marker and is longer than 4 characters. This matches what the extraction
//! prompt asks the model to emit for question stems. It is NOT a Markdown
//! parser, and must not become one: inline emphasis, nested markers, and
//! everything else Markdown allows are treated as plain text.

/// A4 portrait, millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Printable-area margin on all four sides.
pub const MARGIN_MM: f32 = 15.0;
/// Vertical advance per rendered or empty line.
pub const LINE_HEIGHT_MM: f32 = 7.0;
/// Body font size.
pub const FONT_SIZE_PT: f32 = 12.0;

const PT_TO_MM: f32 = 0.352_778;

/// Page geometry for the export.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetrics {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            width_mm: PAGE_WIDTH_MM,
            height_mm: PAGE_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            line_height_mm: LINE_HEIGHT_MM,
            font_size_pt: FONT_SIZE_PT,
        }
    }
}

impl PageMetrics {
    /// Width available to text.
    pub fn printable_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Distance from the page top past which no line may start.
    pub fn bottom_limit_mm(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

/// Measures rendered text width for word-wrapping.
pub trait TextMeasure {
    fn width_mm(&self, text: &str, font_size_pt: f32) -> f32;
}

/// Average-advance estimate (half an em per character). Used with the
/// builtin font, which exposes no glyph metrics.
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        text.chars().count() as f32 * font_size_pt * 0.5 * PT_TO_MM
    }
}

/// Exact advances from a parsed TTF face.
pub struct FaceMeasure<'a> {
    face: ttf_parser::Face<'a>,
}

impl<'a> FaceMeasure<'a> {
    pub fn new(font_bytes: &'a [u8]) -> Result<Self, ttf_parser::FaceParsingError> {
        Ok(Self {
            face: ttf_parser::Face::parse(font_bytes, 0)?,
        })
    }
}

impl TextMeasure for FaceMeasure<'_> {
    fn width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        let upem = self.face.units_per_em() as f32;
        let units: f32 = text
            .chars()
            .map(|ch| {
                self.face
                    .glyph_index(ch)
                    .and_then(|g| self.face.glyph_hor_advance(g))
                    .map(|adv| adv as f32)
                    // Missing glyph: fall back to the half-em estimate.
                    .unwrap_or(upem * 0.5)
            })
            .sum();
        units / upem * font_size_pt * PT_TO_MM
    }
}

/// The two-character bold-marker convention. `trimmed` must already be
/// whitespace-trimmed.
pub fn is_bold_line(trimmed: &str) -> bool {
    trimmed.starts_with("**") && trimmed.ends_with("**") && trimmed.chars().count() > 4
}

/// Strip the leading/trailing markers from a line [`is_bold_line`] accepted.
pub fn strip_bold_markers(trimmed: &str) -> &str {
    &trimmed[2..trimmed.len() - 2]
}

/// Greedy word-wrap of one logical line to the given width. A single word
/// wider than the line is split at character boundaries.
pub fn wrap_line(
    text: &str,
    max_width_mm: f32,
    font_size_pt: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure.width_mm(&candidate, font_size_pt) <= max_width_mm {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measure.width_mm(word, font_size_pt) <= max_width_mm {
            current = word.to_string();
        } else {
            // Over-wide word: hard-split at character boundaries.
            for ch in word.chars() {
                let mut attempt = current.clone();
                attempt.push(ch);
                if !current.is_empty()
                    && measure.width_mm(&attempt, font_size_pt) > max_width_mm
                {
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                } else {
                    current = attempt;
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// One rendered line with its vertical position, measured from the page top.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub bold: bool,
    /// Baseline offset from the top of the page, in millimetres.
    pub y_mm: f32,
}

/// One output page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

/// Lay the extracted text out across pages.
///
/// Walks the text line by line: bold-marked lines lose their markers, every
/// logical line is word-wrapped to the printable width, the cursor advances
/// one line height per wrapped line, a page break is inserted whenever the
/// next line would cross the bottom margin, and empty lines advance the
/// cursor without emitting text.
pub fn layout(text: &str, metrics: &PageMetrics, measure: &dyn TextMeasure) -> Vec<LaidOutPage> {
    let mut pages = vec![LaidOutPage::default()];
    let mut cursor = metrics.margin_mm;
    let bottom = metrics.bottom_limit_mm();
    let lh = metrics.line_height_mm;

    for raw in text.split('\n') {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            cursor += lh;
            if cursor > bottom {
                pages.push(LaidOutPage::default());
                cursor = metrics.margin_mm;
            }
            continue;
        }

        let bold = is_bold_line(trimmed);
        let body = if bold {
            strip_bold_markers(trimmed)
        } else {
            trimmed
        };

        for wrapped in wrap_line(
            body,
            metrics.printable_width_mm(),
            metrics.font_size_pt,
            measure,
        ) {
            if cursor + lh > bottom {
                pages.push(LaidOutPage::default());
                cursor = metrics.margin_mm;
            }
            pages
                .last_mut()
                .expect("at least one page")
                .lines
                .push(PlacedLine {
                    text: wrapped,
                    bold,
                    y_mm: cursor,
                });
            cursor += lh;
        }
    }

    pages
}
