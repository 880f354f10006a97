use crate::config::{DEFAULT_FONT, DEFAULT_FONT_SIZE};
use crate::surface::TextCaretSurface;

/// Initial properties for a new line. Callers override individual fields over
/// the defaults with struct-update syntax:
///
/// ```
/// # use lineup::line::LineInit;
/// let init = LineInit { text: "hello".to_string(), ..LineInit::default() };
/// ```
#[derive(Debug, Clone)]
pub struct LineInit {
    pub text: String,
    pub font: String,
    pub size: u32,
}

impl Default for LineInit {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: DEFAULT_FONT.to_string(),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// One row of the composed message, with independent text, font and size,
/// owning the editable surface that displays it.
///
/// The style setters push to the surface synchronously, so the rendered
/// font/size can never lag the properties. Style values are not validated
/// here: the font and size input controls constrain them at the boundary,
/// and out-of-range values pass through unchanged.
#[derive(Debug)]
pub struct Line<S> {
    text: String,
    font: String,
    size: u32,
    surface: S,
}

impl<S: TextCaretSurface> Line<S> {
    pub fn new(init: LineInit, mut surface: S) -> Self {
        surface.set_text(&init.text);
        surface.set_font_family(&init.font);
        surface.set_font_size(init.size);
        Self {
            text: init.text,
            font: init.font,
            size: init.size,
            surface,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Change the font, updating the rendered font family as part of the
    /// assignment itself.
    pub fn set_font(&mut self, font: impl Into<String>) {
        let font = font.into();
        self.surface.set_font_family(&font);
        self.font = font;
    }

    /// Change the size, updating the rendered font size as part of the
    /// assignment itself.
    pub fn set_size(&mut self, size: u32) {
        self.surface.set_font_size(size);
        self.size = size;
    }

    /// Replace both the text property and the rendered text. Used by
    /// structural edits (split, merge); ordinary typing flows the other way,
    /// through [`Line::sync_text_from_surface`].
    pub fn replace_text(&mut self, text: &str) {
        self.surface.set_text(text);
        self.text = text.to_string();
    }

    /// Pull the text property from whatever the surface currently renders.
    /// Called on the surface's text-change events (blur, key release, paste).
    pub fn sync_text_from_surface(&mut self) {
        self.text = self.surface.text();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
