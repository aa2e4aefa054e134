use crate::registry::SymbolRegistry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Matches a `#tag` or `$variable` reference inside free-form text.
static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#$][A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Matches a chip placeholder spliced into annotated text.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__CHIP_([0-9a-fA-F-]{36})__").unwrap());

/// Which namespace a chip was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipKind {
    Tag,
    Variable,
}

impl ChipKind {
    pub fn sigil(self) -> char {
        match self {
            ChipKind::Tag => '#',
            ChipKind::Variable => '$',
        }
    }
}

/// An atomic token standing in for a resolved reference inside editable
/// condition text. Identity is used only for removal and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionChip {
    pub id: String,
    pub text: String,
    pub kind: ChipKind,
    #[serde(rename = "originalName")]
    pub original_name: String,
}

impl ConditionChip {
    pub fn new(kind: ChipKind, name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: format!("{}{}", kind.sigil(), name),
            kind,
            original_name: name.to_string(),
        }
    }

    fn placeholder(&self) -> String {
        format!("__CHIP_{}__", self.id)
    }
}

/// A view of condition text, non-chip segments first.
#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Chip(&'a ConditionChip),
}

/// A condition string annotated with chip placeholders, paired with the
/// chips themselves. Together they reconstruct the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCondition {
    annotated: String,
    chips: Vec<ConditionChip>,
}

impl TokenizedCondition {
    pub fn annotated(&self) -> &str {
        &self.annotated
    }

    pub fn chips(&self) -> &[ConditionChip] {
        &self.chips
    }

    /// Rebuilds the raw condition string by substituting every placeholder
    /// with its chip's text.
    pub fn reconstruct(&self) -> String {
        let mut text = self.annotated.clone();
        for chip in &self.chips {
            text = text.replace(&chip.placeholder(), &chip.text);
        }
        text
    }

    /// Removes a chip and its placeholder. The reconstructed string then
    /// omits that reference entirely.
    pub fn remove_chip(&mut self, chip_id: &str) -> bool {
        let Some(pos) = self.chips.iter().position(|c| c.id == chip_id) else {
            return false;
        };
        let chip = self.chips.remove(pos);
        self.annotated = self.annotated.replace(&chip.placeholder(), "");
        true
    }

    /// Splices a freshly selected chip into the annotated text at a byte
    /// offset, returning the offset just past the placeholder. An offset off
    /// a char boundary leaves the text untouched and returns `None`.
    pub fn insert_chip(&mut self, at: usize, chip: ConditionChip) -> Option<usize> {
        if !self.annotated.is_char_boundary(at) {
            return None;
        }
        let placeholder = chip.placeholder();
        self.annotated.insert_str(at, &placeholder);
        self.chips.push(chip);
        Some(at + placeholder.len())
    }

    /// Alternating plain-text and chip segments, in document order, for a
    /// rendering surface to lay out.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::new();
        let mut last_end = 0;
        for m in PLACEHOLDER.find_iter(&self.annotated) {
            if m.start() > last_end {
                segments.push(Segment::Text(&self.annotated[last_end..m.start()]));
            }
            let id = &self.annotated[m.start() + 7..m.end() - 2];
            if let Some(chip) = self.chips.iter().find(|c| c.id == id) {
                segments.push(Segment::Chip(chip));
            } else {
                // Placeholder without a chip entry: surface it as text
                // rather than dropping user content.
                segments.push(Segment::Text(&self.annotated[m.start()..m.end()]));
            }
            last_end = m.end();
        }
        if last_end < self.annotated.len() {
            segments.push(Segment::Text(&self.annotated[last_end..]));
        }
        segments
    }
}

/// Scans a condition string for `#tag` and `$variable` references, resolves
/// each against its registry, and replaces resolved matches with opaque
/// placeholders. Unresolved references stay as plain text. Replacement runs
/// right to left so earlier byte offsets stay valid.
pub fn derive_chips(
    text: &str,
    tags: &SymbolRegistry,
    variables: &SymbolRegistry,
) -> TokenizedCondition {
    let mut resolved: Vec<(usize, usize, ConditionChip)> = Vec::new();

    for m in REFERENCE.find_iter(text) {
        let reference = m.as_str();
        let name = &reference[1..];
        let chip = match reference.as_bytes()[0] {
            b'#' if tags.get(name).is_some() => ConditionChip::new(ChipKind::Tag, name),
            b'$' if variables.get(name).is_some() => ConditionChip::new(ChipKind::Variable, name),
            _ => continue,
        };
        resolved.push((m.start(), m.end(), chip));
    }

    let mut annotated = text.to_string();
    let mut chips = Vec::with_capacity(resolved.len());
    for (start, end, chip) in resolved.into_iter().rev() {
        annotated.replace_range(start..end, &chip.placeholder());
        chips.push(chip);
    }
    chips.reverse();

    TokenizedCondition { annotated, chips }
}
