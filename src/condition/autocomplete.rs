use super::tokenizer::{ChipKind, ConditionChip};
use crate::registry::SymbolRegistry;

/// One entry in the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    pub kind: ChipKind,
}

/// The result of accepting a suggestion: the spliced text, the cursor
/// repositioned just after the inserted name, and the chip to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub cursor: usize,
    pub chip: ConditionChip,
}

/// Suggestion state for one condition input, recomputed synchronously on
/// every keystroke. Cursor offsets are byte offsets into the text; an offset
/// off a char boundary is treated as no trigger, never a panic.
#[derive(Debug, Default)]
pub struct Autocomplete {
    open: bool,
    trigger: Option<ChipKind>,
    suggestions: Vec<Suggestion>,
    cursor: usize,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn trigger(&self) -> Option<ChipKind> {
        self.trigger
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        if self.open {
            &self.suggestions
        } else {
            &[]
        }
    }

    /// Recomputes suggestion state from the text and cursor position.
    ///
    /// A trigger character immediately before the cursor opens the full,
    /// unfiltered namespace. A cursor inside an in-progress token (a trigger
    /// with no intervening space before the cursor) filters by
    /// case-insensitive substring on the partial name; the panel stays open
    /// only while at least one entry matches. A cursor past the end of the
    /// text or off a char boundary closes the panel.
    pub fn update(
        &mut self,
        text: &str,
        cursor: usize,
        tags: &SymbolRegistry,
        variables: &SymbolRegistry,
    ) {
        if !text.is_char_boundary(cursor) {
            self.close();
            return;
        }
        self.cursor = cursor;
        let before = &text[..cursor];

        if before.ends_with('#') {
            self.open_with(ChipKind::Tag, full_namespace(tags, ChipKind::Tag));
            return;
        }
        if before.ends_with('$') {
            self.open_with(ChipKind::Variable, full_namespace(variables, ChipKind::Variable));
            return;
        }

        if let Some(idx) = before.rfind('#') {
            if !before[idx..].contains(' ') {
                let partial = &before[idx + 1..];
                self.open_filtered(ChipKind::Tag, tags, partial);
                return;
            }
        }
        if let Some(idx) = before.rfind('$') {
            if !before[idx..].contains(' ') {
                let partial = &before[idx + 1..];
                self.open_filtered(ChipKind::Variable, variables, partial);
                return;
            }
        }

        self.close();
    }

    /// Accepts a suggestion: removes the partial trigger text, inserts
    /// `trigger+name`, and closes the panel. `text` must be the string the
    /// last `update` saw.
    pub fn select(&mut self, text: &str, name: &str) -> Option<Selection> {
        let kind = self.trigger?;
        if !text.is_char_boundary(self.cursor) {
            return None;
        }
        let before = &text[..self.cursor];
        let trigger_index = before.rfind(kind.sigil())?;

        let chip = ConditionChip::new(kind, name);
        let spliced = format!(
            "{}{}{}{}",
            &text[..trigger_index],
            kind.sigil(),
            name,
            &text[self.cursor..]
        );
        let cursor = trigger_index + kind.sigil().len_utf8() + name.len();

        self.close();
        Some(Selection {
            text: spliced,
            cursor,
            chip,
        })
    }

    /// Closes the panel without altering text (the Escape path).
    pub fn close(&mut self) {
        self.open = false;
        self.trigger = None;
        self.suggestions.clear();
    }

    fn open_with(&mut self, kind: ChipKind, suggestions: Vec<Suggestion>) {
        self.trigger = Some(kind);
        self.suggestions = suggestions;
        self.open = true;
    }

    fn open_filtered(&mut self, kind: ChipKind, registry: &SymbolRegistry, partial: &str) {
        let needle = partial.to_lowercase();
        let filtered: Vec<Suggestion> = registry
            .list()
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .map(|s| Suggestion {
                name: s.name.clone(),
                kind,
            })
            .collect();

        if filtered.is_empty() {
            self.close();
        } else {
            self.open_with(kind, filtered);
        }
    }
}

fn full_namespace(registry: &SymbolRegistry, kind: ChipKind) -> Vec<Suggestion> {
    registry
        .list()
        .iter()
        .map(|s| Suggestion {
            name: s.name.clone(),
            kind,
        })
        .collect()
}
