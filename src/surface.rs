//! Display-surface seam.
//!
//! The core editing model never touches a concrete UI toolkit. Each line owns
//! an opaque editable surface reached through [`TextCaretSurface`], and the
//! visual list container is reached through [`SurfaceHost`]. Any toolkit that
//! can show editable text and report a caret offset can implement these.

use std::cell::Cell;
use std::rc::Rc;

/// One editable text region with a caret.
///
/// Caret offsets are `char` offsets into the surface text: 0 is before the
/// first character, `text().chars().count()` is after the last.
pub trait TextCaretSurface {
    /// Current rendered text.
    fn text(&self) -> String;

    /// Replace the rendered text.
    fn set_text(&mut self, text: &str);

    /// Caret position as a char offset (the end of the first selection range).
    fn caret_offset(&self) -> usize;

    fn set_caret_offset(&mut self, offset: usize);

    fn set_font_family(&mut self, font: &str);

    fn set_font_size(&mut self, size: u32);

    /// Grab focus and place the caret at the start or at the end.
    fn focus(&mut self, at_start: bool);

    /// Split the rendered text at the caret into (before, after).
    fn split_at_caret(&self) -> (String, String) {
        let text = self.text();
        let split = text
            .char_indices()
            .nth(self.caret_offset())
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        (text[..split].to_string(), text[split..].to_string())
    }
}

/// The visual list container that line surfaces live in.
///
/// `attach` creates a surface at a visual position and `detach` removes one,
/// so sibling order in the container always mirrors the logical line order.
pub trait SurfaceHost {
    type Surface: TextCaretSurface;

    fn attach(&mut self, index: usize) -> Self::Surface;

    fn detach(&mut self, index: usize);
}

/// In-memory surface used by the terminal frontend and by tests.
///
/// Focus is modelled the way a real windowing system models it: all surfaces
/// created by one [`PlainHost`] share a focus token, and at most one of them
/// holds it at a time.
#[derive(Debug)]
pub struct PlainSurface {
    id: u64,
    text: String,
    caret: usize,
    font: String,
    size: u32,
    focus: Rc<Cell<u64>>,
}

impl PlainSurface {
    pub fn is_focused(&self) -> bool {
        self.focus.get() == self.id
    }

    pub fn font_family(&self) -> &str {
        &self.font
    }

    pub fn font_size(&self) -> u32 {
        self.size
    }

    /// Native editing: insert a character at the caret and advance it.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.caret);
        self.text.insert(at, c);
        self.caret += 1;
    }

    /// Native editing: delete the character before the caret, if any.
    pub fn delete_back(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        let at = self.byte_offset(self.caret);
        self.text.remove(at);
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl TextCaretSurface for PlainSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        // Keep the caret inside the new text.
        self.caret = self.caret.min(self.char_len());
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn set_caret_offset(&mut self, offset: usize) {
        self.caret = offset.min(self.char_len());
    }

    fn set_font_family(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_font_size(&mut self, size: u32) {
        self.size = size;
    }

    fn focus(&mut self, at_start: bool) {
        self.focus.set(self.id);
        self.caret = if at_start { 0 } else { self.char_len() };
    }
}

/// Host for [`PlainSurface`]s. Visual order is whatever order the owner
/// renders the lines in, so attach/detach only hand out surfaces and log.
#[derive(Debug, Default)]
pub struct PlainHost {
    next_id: u64,
    focus: Rc<Cell<u64>>,
}

impl PlainHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurfaceHost for PlainHost {
    type Surface = PlainSurface;

    fn attach(&mut self, index: usize) -> PlainSurface {
        self.next_id += 1;
        tracing::debug!(index, id = self.next_id, "attaching surface");
        PlainSurface {
            id: self.next_id,
            text: String::new(),
            caret: 0,
            font: String::new(),
            size: 0,
            focus: Rc::clone(&self.focus),
        }
    }

    fn detach(&mut self, index: usize) {
        tracing::debug!(index, "detaching surface");
    }
}
