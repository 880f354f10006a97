use crate::line::{Line, LineInit};
use crate::surface::{SurfaceHost, TextCaretSurface};
use tracing::{debug, warn};

/// The ordered sequence of message lines.
///
/// Owns every [`Line`] and the host that mirrors them visually. All mutation
/// goes through [`LineStore::insert_line`] and [`LineStore::remove_line`] so
/// logical order and visual order can never diverge. The sequence is never
/// empty: the store is constructed with one line and refuses to remove the
/// last one.
pub struct LineStore<H: SurfaceHost> {
    lines: Vec<Line<H::Surface>>,
    host: H,
}

impl<H: SurfaceHost> LineStore<H> {
    /// Create a store containing a single bootstrap line built from `init`.
    pub fn new(host: H, init: LineInit) -> Self {
        let mut store = Self {
            lines: Vec::new(),
            host,
        };
        store.insert_line(init, 0);
        store
    }

    /// Construct a new line from `init` and insert it immediately after
    /// `after` (both logically and in the visual container). Focus moves to
    /// the new line with the caret at its start. Returns the new line's index.
    pub fn insert_line(&mut self, init: LineInit, after: usize) -> usize {
        let at = (after + 1).min(self.lines.len());
        let surface = self.host.attach(at);
        let mut line = Line::new(init, surface);
        line.surface_mut().focus(true);
        debug!(index = at, font = line.font(), size = line.size(), "line inserted");
        self.lines.insert(at, line);
        at
    }

    /// Remove the line at `index`, detaching its surface. Removing the last
    /// remaining line is a no-op: the sequence must never become empty.
    /// Returns whether a line was removed.
    pub fn remove_line(&mut self, index: usize) -> bool {
        if self.lines.len() <= 1 {
            warn!("refusing to remove the last remaining line");
            return false;
        }
        if index >= self.lines.len() {
            warn!(index, len = self.lines.len(), "remove_line index out of range");
            return false;
        }
        self.host.detach(index);
        drop(self.lines.remove(index));
        debug!(index, "line removed");
        true
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: the store holds at least one line by construction.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line<H::Surface>> {
        self.lines.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Line<H::Surface>> {
        self.lines.get_mut(index)
    }

    /// The lines in visual order (line N renders above line N+1).
    pub fn lines(&self) -> &[Line<H::Surface>] {
        &self.lines
    }

    /// Index of the line whose surface currently holds focus.
    pub fn focused_index(&self, is_focused: impl Fn(&H::Surface) -> bool) -> Option<usize> {
        self.lines.iter().position(|line| is_focused(line.surface()))
    }

    /// The texts of all lines in order. Handy for assertions and status lines.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text().to_string()).collect()
    }
}
