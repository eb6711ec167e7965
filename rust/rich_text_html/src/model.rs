use serde::{Deserialize, Serialize};

use crate::color::normalize_run_color;
use crate::error::{Error, Result};

fn is_false(b: &bool) -> bool {
    !*b
}

/// Font attributes of one run. Maps 1:1 onto a spreadsheet font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunStyle {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub superscript: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub subscript: bool,
    /// RRGGBB (or AARRGGBB when read back from a workbook), uppercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RunStyle {
    /// True when no attribute is set, i.e. the run renders as plain text.
    pub fn is_plain(&self) -> bool {
        !(self.bold
            || self.italic
            || self.underline
            || self.strikethrough
            || self.superscript
            || self.subscript
            || self.color.is_some())
    }

    pub fn set_color(&mut self, color: &str) -> Result<()> {
        let c = normalize_run_color(color).ok_or_else(|| Error::InvalidColor(color.to_string()))?;
        self.color = Some(c);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// `None` for an unstyled run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<RunStyle>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Plain run when `style` has nothing set, styled run otherwise.
    pub fn with_style(text: impl Into<String>, style: &RunStyle) -> Self {
        if style.is_plain() {
            Self::plain(text)
        } else {
            Self::styled(text, style.clone())
        }
    }
}

/// Ordered runs making up one cell's content. Runs are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        let total: usize = self.runs.iter().map(|r| r.text.len()).sum();
        let mut out = String::with_capacity(total);
        for run in &self.runs {
            out.push_str(&run.text);
        }
        out
    }
}

impl From<Vec<TextRun>> for RichText {
    fn from(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }
}

impl FromIterator<TextRun> for RichText {
    fn from_iter<I: IntoIterator<Item = TextRun>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().collect(),
        }
    }
}

/// Cell content: either a bare string or a rich text value.
///
/// On the wire a plain cell is a JSON string and a rich cell is an array of
/// runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellText {
    Plain(String),
    Rich(RichText),
}

impl CellText {
    pub fn plain_text(&self) -> String {
        match self {
            CellText::Plain(s) => s.clone(),
            CellText::Rich(rt) => rt.plain_text(),
        }
    }

    pub fn as_rich(&self) -> Option<&RichText> {
        match self {
            CellText::Rich(rt) => Some(rt),
            CellText::Plain(_) => None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut cell: CellText = serde_json::from_str(json)?;
        if let CellText::Rich(rt) = &mut cell {
            for run in &mut rt.runs {
                if let Some(style) = &mut run.style {
                    if let Some(c) = style.color.take() {
                        style.set_color(&c)?;
                    }
                }
            }
        }
        Ok(cell)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }
}

impl Default for CellText {
    fn default() -> Self {
        CellText::Plain(String::new())
    }
}

impl From<&str> for CellText {
    fn from(s: &str) -> Self {
        CellText::Plain(s.to_string())
    }
}

impl From<String> for CellText {
    fn from(s: String) -> Self {
        CellText::Plain(s)
    }
}

impl From<RichText> for CellText {
    fn from(rt: RichText) -> Self {
        CellText::Rich(rt)
    }
}
