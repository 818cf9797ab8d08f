use super::{Handler, ParentCode};
use crate::conversion::domain::csaf::Note;
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{Diagnostics, Fragment};
use crate::shared::error::StructureError;
use roxmltree::Node;

/// Note categories CSAF 2.0 accepts
pub const NOTE_CATEGORIES: [&str; 7] = [
    "description",
    "details",
    "faq",
    "general",
    "legal_disclaimer",
    "other",
    "summary",
];

/// Notes below `DocumentNotes` or a vulnerability's `Notes`
pub struct Notes {
    parent: ParentCode,
    notes: Vec<Note>,
    diagnostics: Diagnostics,
}

impl Notes {
    pub fn new(parent: ParentCode) -> Self {
        Self {
            parent,
            notes: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Handler for Notes {
    fn always(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        for note in cvrf::children(node, "Note") {
            let text = match cvrf::require_text(note) {
                Ok(text) => text,
                Err(err) => {
                    self.diagnostics.error(format!(
                        "skipping note at input line {}: {}",
                        cvrf::line(note),
                        err
                    ));
                    continue;
                }
            };

            let category = cvrf::snake_token(note.attribute("Type").unwrap_or_default());
            if !NOTE_CATEGORIES.contains(&category.as_str()) {
                self.diagnostics.error(format!(
                    "invalid notes category {}, should be one of: {}",
                    category,
                    NOTE_CATEGORIES.join(", ")
                ));
            }

            self.notes.push(Note {
                category,
                text,
                audience: note.attribute("Audience").map(str::to_string),
                title: note.attribute("Title").map(str::to_string),
            });
        }
        Ok(())
    }

    fn sometimes(&mut self, _node: Node<'_, '_>) -> Result<(), StructureError> {
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        self.parent.list_fragment("notes", &self.notes)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
