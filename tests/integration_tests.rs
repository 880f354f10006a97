// Integration tests - testing how modules work together

mod common;

use common::{place_caret, store_with};
use lineup::config::EditorConfig;
use lineup::input::{Disposition, Key};
use lineup::store::LineStore;
use lineup::surface::{PlainHost, PlainSurface, TextCaretSurface};
use proptest::prelude::*;

/// A full composing session: type, split twice, restyle a line, merge back.
#[test]
fn test_compose_session_flow() {
    common::tracing::init_tracing_from_env();

    let mut store = store_with(&["good morning brave new world"]);

    // Split after "good morning".
    place_caret(&mut store, 0, 12);
    assert_eq!(store.key_down(0, Key::Enter), Disposition::Consumed);
    assert_eq!(store.texts(), vec!["good morning", "brave new world"]);

    // The new line is focused at its start and inherits the styling.
    assert_eq!(
        store.focused_index(PlainSurface::is_focused),
        Some(1),
        "focus must follow the split"
    );
    assert_eq!(store.get(1).unwrap().surface().caret_offset(), 0);
    assert_eq!(store.get(1).unwrap().font(), store.get(0).unwrap().font());

    // Restyle the second line; the surface reflects it with no extra step.
    {
        let line = store.get_mut(1).unwrap();
        line.set_font("Times New Roman");
        line.set_size(40);
        assert_eq!(line.surface().font_family(), "Times New Roman");
        assert_eq!(line.surface().font_size(), 40);
    }

    // Split again, after "brave".
    place_caret(&mut store, 1, 5);
    store.key_down(1, Key::Enter);
    assert_eq!(
        store.texts(),
        vec!["good morning", "brave", "new world"]
    );
    assert_eq!(store.get(2).unwrap().font(), "Times New Roman");
    assert_eq!(store.get(2).unwrap().size(), 40);

    // Merge the last line back up.
    place_caret(&mut store, 2, 0);
    store.key_down(2, Key::Backspace);
    assert_eq!(store.texts(), vec!["good morning", "brave new world"]);
    assert_eq!(store.focused_index(PlainSurface::is_focused), Some(1));
}

/// The first line has no line above it: Backspace at its start merges it
/// forward into the second line instead.
#[test]
fn test_first_line_merges_forward() {
    let mut store = store_with(&["abc", "def"]);
    place_caret(&mut store, 0, 0);
    assert_eq!(store.key_down(0, Key::Backspace), Disposition::Consumed);
    assert_eq!(store.texts(), vec!["abc def"]);
}

#[test]
fn test_merge_into_line_above() {
    let mut store = store_with(&["abc", "def", "ghi"]);
    place_caret(&mut store, 2, 0);
    store.key_down(2, Key::Backspace);
    assert_eq!(store.texts(), vec!["abc", "def ghi"]);
}

/// Native typing flows surface-first; the property catches up on the
/// text-change events (key release, blur, paste).
#[test]
fn test_native_typing_resync() {
    let mut store = store_with(&["hell"]);
    {
        let surface = store.get_mut(0).unwrap().surface_mut();
        surface.set_caret_offset(4);
        surface.insert_char('o');
    }
    assert_eq!(store.get(0).unwrap().text(), "hell");
    store.text_changed(0);
    assert_eq!(store.get(0).unwrap().text(), "hello");
}

#[test]
fn test_config_round_trips_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");

    let mut config = EditorConfig::default();
    config.fonts.push("Courier".to_string());
    config.max_font_size = 48;
    config.save(&path).expect("save config");

    let loaded = EditorConfig::load(&path).expect("load config");
    assert_eq!(loaded.fonts, config.fonts);
    assert_eq!(loaded.max_font_size, 48);
    assert_eq!(loaded.min_font_size, 10);
}

fn arbitrary_key(selector: u8) -> Key {
    match selector % 3 {
        0 => Key::Enter,
        1 => Key::Backspace,
        _ => Key::Other,
    }
}

fn non_whitespace_chars(store: &LineStore<PlainHost>) -> usize {
    store
        .texts()
        .iter()
        .map(|text| text.chars().filter(|c| !c.is_whitespace()).count())
        .sum()
}

proptest! {
    /// For any sequence of Enter/Backspace key-downs at any caret positions,
    /// the line count never drops below one.
    #[test]
    fn prop_line_count_never_below_one(
        ops in proptest::collection::vec((any::<u8>(), 0usize..16, any::<u8>()), 0..40)
    ) {
        let mut store = store_with(&["try me out"]);
        for (line_selector, caret, key_selector) in ops {
            let index = line_selector as usize % store.len();
            place_caret(&mut store, index, caret);
            store.key_down(index, arbitrary_key(key_selector));
            prop_assert!(store.len() >= 1);
        }
    }

    /// Splits drop only whitespace and merges add only a separating space, so
    /// structural edits never lose visible characters.
    #[test]
    fn prop_structural_edits_keep_visible_characters(
        ops in proptest::collection::vec((any::<u8>(), 0usize..16, any::<u8>()), 0..40)
    ) {
        let mut store = store_with(&["the quick brown fox"]);
        let visible = non_whitespace_chars(&store);
        for (line_selector, caret, key_selector) in ops {
            let index = line_selector as usize % store.len();
            place_caret(&mut store, index, caret);
            store.key_down(index, arbitrary_key(key_selector));
            prop_assert_eq!(non_whitespace_chars(&store), visible);
        }
    }

    /// Structural edits write text to the property and the surface together;
    /// they can never leave a line's rendered text stale.
    #[test]
    fn prop_surfaces_never_go_stale(
        ops in proptest::collection::vec((any::<u8>(), 0usize..16, any::<u8>()), 0..40)
    ) {
        let mut store = store_with(&["try me out"]);
        for (line_selector, caret, key_selector) in ops {
            let index = line_selector as usize % store.len();
            place_caret(&mut store, index, caret);
            store.key_down(index, arbitrary_key(key_selector));
            for line in store.lines() {
                prop_assert_eq!(line.text(), line.surface().text());
            }
        }
    }
}
