pub mod tracing;

use lineup::line::LineInit;
use lineup::store::LineStore;
use lineup::surface::{PlainHost, TextCaretSurface};

/// Build a store holding the given line texts, in order, with default styling.
pub fn store_with(texts: &[&str]) -> LineStore<PlainHost> {
    let mut texts = texts.iter();
    let first = texts.next().copied().unwrap_or("");
    let mut store = LineStore::new(
        PlainHost::new(),
        LineInit {
            text: first.to_string(),
            ..LineInit::default()
        },
    );
    for (i, text) in texts.enumerate() {
        store.insert_line(
            LineInit {
                text: text.to_string(),
                ..LineInit::default()
            },
            i,
        );
    }
    store
}

/// Put the caret at `offset` in the line at `index`.
pub fn place_caret(store: &mut LineStore<PlainHost>, index: usize, offset: usize) {
    store
        .get_mut(index)
        .expect("line index out of range")
        .surface_mut()
        .set_caret_offset(offset);
}
