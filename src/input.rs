//! Key-event policy: how raw key-downs on a line's surface become structural
//! edits on the [`LineStore`].
//!
//! Only Enter and Backspace can restructure the line sequence. Everything
//! else passes through to the surface's native editing, and the text property
//! is resynced later from the surface's text-change events (blur, key
//! release, paste) via [`LineStore::text_changed`].

use crate::line::LineInit;
use crate::store::LineStore;
use crate::surface::{SurfaceHost, TextCaretSurface};
use tracing::debug;

/// The keys the policy cares about. Frontends map their native key events
/// onto this before calling [`LineStore::key_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    /// Any key without structural meaning.
    Other,
}

/// What the frontend should do with the native key event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The policy performed a structural edit; suppress native handling.
    Consumed,
    /// No structural effect; let native text editing proceed.
    PassThrough,
}

impl<H: SurfaceHost> LineStore<H> {
    /// Handle a key-down on the line at `index`.
    ///
    /// Enter always splits the line at the caret. Backspace merges the line
    /// into its neighbor when the caret sits at offset 0 and another line
    /// exists; otherwise it passes through as a plain character deletion.
    pub fn key_down(&mut self, index: usize, key: Key) -> Disposition {
        match key {
            Key::Enter => self.split_line(index),
            Key::Backspace => self.try_merge_line(index),
            Key::Other => Disposition::PassThrough,
        }
    }

    /// Resync the line's text property from its surface. Frontends call this
    /// on the surface's text-change events (blur, key release, paste).
    pub fn text_changed(&mut self, index: usize) {
        if let Some(line) = self.get_mut(index) {
            line.sync_text_from_surface();
        }
    }

    /// Enter: the text before the caret stays here, the text after the caret
    /// (trimmed) becomes a new line right below, inheriting this line's
    /// font and size. Focus moves to the new line, caret at its start.
    fn split_line(&mut self, index: usize) -> Disposition {
        let Some(line) = self.get_mut(index) else {
            return Disposition::PassThrough;
        };
        let (before, after) = line.surface().split_at_caret();
        line.replace_text(&before);
        let init = LineInit {
            text: after.trim().to_string(),
            font: line.font().to_string(),
            size: line.size(),
        };
        debug!(index, before = %before, after = %init.text, "splitting line");
        self.insert_line(init, index);
        Disposition::Consumed
    }

    /// Backspace at offset 0 with more than one line: fold this line's
    /// after-caret text into the neighboring line and remove this one.
    ///
    /// The target is the line above, except for the first line, which merges
    /// forward into the line below it. Joined text keeps top-to-bottom visual
    /// order with a single separating space. Focus moves to the target with
    /// the caret at its end, not at the join point; after-merge caret
    /// placement is approximate.
    fn try_merge_line(&mut self, index: usize) -> Disposition {
        let Some(line) = self.get(index) else {
            return Disposition::PassThrough;
        };
        if self.len() <= 1 || line.surface().caret_offset() != 0 {
            return Disposition::PassThrough;
        }

        let (_, after) = line.surface().split_at_caret();
        let target = if index > 0 { index - 1 } else { 1 };

        if !after.is_empty() {
            if let Some(target_line) = self.get_mut(target) {
                // Join in visual order: the upper line's text comes first.
                let joined = if index < target {
                    format!("{} {}", after, target_line.text())
                } else {
                    format!("{} {}", target_line.text(), after)
                };
                target_line.replace_text(&joined);
            }
        }

        debug!(index, target, carried = %after, "merging line");
        self.remove_line(index);

        // The target shifts down by one when the removed line was above it.
        let target = if index < target { target - 1 } else { target };
        if let Some(target_line) = self.get_mut(target) {
            target_line.surface_mut().focus(false);
        }
        Disposition::Consumed
    }
}
