use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Position, Rect};
use ratatui::style::Stylize;
use ratatui::text::{Line as UiLine, Span, Text};
use ratatui::{DefaultTerminal, Frame};
use tracing_subscriber::EnvFilter;

use lineup::config::EditorConfig;
use lineup::input::{Disposition, Key};
use lineup::line::LineInit;
use lineup::store::LineStore;
use lineup::surface::{PlainHost, PlainSurface, TextCaretSurface};

#[derive(Debug, Parser)]
#[command(name = "lineup", about = "Compose a short message, one styled line at a time")]
struct Args {
    /// Path to a JSON config file (fonts and size bounds)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text of the bootstrap line
    #[arg(long, default_value = "Try Me...")]
    text: String,

    /// Append logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

struct App {
    store: LineStore<PlainHost>,
    config: EditorConfig,
    status_text: String,
}

impl App {
    fn new(config: EditorConfig, bootstrap_text: String) -> Self {
        let init = LineInit {
            text: bootstrap_text,
            font: config
                .fonts
                .first()
                .cloned()
                .unwrap_or_else(|| lineup::config::DEFAULT_FONT.to_string()),
            size: config.default_font_size,
        };
        Self {
            store: LineStore::new(PlainHost::new(), init),
            config,
            status_text: String::new(),
        }
    }

    fn run(&mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.draw_frame(frame))?;

            let event = event::read()?;
            if !self.handle_event(event) {
                break Ok(());
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> bool {
        if let Event::Key(key_event) = event {
            return self.handle_key_event(key_event);
        }

        true
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind == KeyEventKind::Release {
            return true;
        }

        let index = self.focused_index();
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => return false,

            // The style controls. They clamp and enumerate here, at the
            // boundary, so the line model itself never validates.
            (KeyCode::Tab, _) => {
                if let Some(line) = self.store.get_mut(index) {
                    let next = self.config.font_after(line.font()).to_string();
                    line.set_font(next);
                }
            }
            (KeyCode::Up, KeyModifiers::CONTROL) => self.step_size(index, 1),
            (KeyCode::Down, KeyModifiers::CONTROL) => self.step_size(index, -1),

            (KeyCode::Up, _) => self.focus_line(index.saturating_sub(1)),
            (KeyCode::Down, _) => self.focus_line((index + 1).min(self.store.len() - 1)),
            (KeyCode::Left, _) => self.move_caret(index, -1),
            (KeyCode::Right, _) => self.move_caret(index, 1),
            (KeyCode::Home, _) => self.set_caret(index, 0),
            (KeyCode::End, _) => self.set_caret(index, usize::MAX),

            (KeyCode::Enter, _) => {
                self.store.key_down(index, Key::Enter);
            }
            (KeyCode::Backspace, _) => {
                if self.store.key_down(index, Key::Backspace) == Disposition::PassThrough {
                    if let Some(line) = self.store.get_mut(index) {
                        line.surface_mut().delete_back();
                    }
                    // Key release: resync the text property from the surface.
                    self.store.text_changed(index);
                }
            }
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.store.key_down(index, Key::Other);
                if let Some(line) = self.store.get_mut(index) {
                    line.surface_mut().insert_char(c);
                }
                self.store.text_changed(index);
            }
            _ => {}
        }

        true
    }

    fn focused_index(&self) -> usize {
        self.store
            .focused_index(PlainSurface::is_focused)
            .unwrap_or(0)
    }

    fn focus_line(&mut self, index: usize) {
        if let Some(line) = self.store.get_mut(index) {
            line.surface_mut().focus(false);
        }
    }

    fn move_caret(&mut self, index: usize, delta: isize) {
        if let Some(line) = self.store.get_mut(index) {
            let surface = line.surface_mut();
            let caret = surface.caret_offset();
            let caret = if delta < 0 {
                caret.saturating_sub(delta.unsigned_abs())
            } else {
                caret + delta as usize
            };
            surface.set_caret_offset(caret);
        }
    }

    fn set_caret(&mut self, index: usize, offset: usize) {
        if let Some(line) = self.store.get_mut(index) {
            line.surface_mut().set_caret_offset(offset);
        }
    }

    fn step_size(&mut self, index: usize, delta: i32) {
        if let Some(line) = self.store.get_mut(index) {
            let requested = line.size().saturating_add_signed(delta);
            let clamped = self.config.clamp_size(requested);
            line.set_size(clamped);
        }
    }

    fn line_label(line: &lineup::line::Line<PlainSurface>) -> String {
        format!("{:>2}pt {} ", line.size(), line.font())
    }

    fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let text_area = Rect::new(0, 0, area.width, area.height.saturating_sub(1));
        let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);

        let gutter_width = self
            .store
            .lines()
            .iter()
            .map(|line| Self::line_label(line).chars().count())
            .max()
            .unwrap_or(0);

        let mut rows = Vec::new();
        for line in self.store.lines() {
            let label = format!("{:<width$}", Self::line_label(line), width = gutter_width);
            rows.push(UiLine::from(vec![
                Span::raw(label).dim(),
                Span::raw(line.surface().text()),
            ]));
        }
        frame.render_widget(Text::from(rows), text_area);

        self.status_text = format!(
            "{} lines | Ctrl+Q quit | Enter split | Tab font | Ctrl+Up/Down size",
            self.store.len()
        );
        frame.render_widget(self.status_text.clone(), status_area);

        let focused = self.focused_index();
        if let Some(line) = self.store.get(focused) {
            let caret = line.surface().caret_offset();
            frame.set_cursor_position(Position::new(
                (gutter_width + caret).min(area.width.saturating_sub(1) as usize) as u16,
                focused.min(text_area.height.saturating_sub(1) as usize) as u16,
            ));
        }
    }
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let log_file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let mut app = App::new(config, args.text);
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}
