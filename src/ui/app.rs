use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use rand::rngs::ThreadRng;
use rand::Rng;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{format_quote, Quote};
use crate::picker::QuotePicker;
use crate::share::{ClipboardSink, ShareSink};
use crate::store::QuoteStore;

use super::helpers::{centered_rect, quote_card_lines, surface_error};

/// Rows reserved for the title bar.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Share of the content area the quote card occupies, in percent.
const CARD_WIDTH_PERCENT: u16 = 80;
const CARD_HEIGHT_PERCENT: u16 = 60;
const APP_TITLE: &str = "QuoteSpark";

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// State behind the quote screen. The displayed quote is a plain owned value;
/// it only changes through [`App::set_current_quote`], which the "next" action
/// calls after asking the picker.
pub struct App<R = ThreadRng> {
    store: QuoteStore,
    picker: QuotePicker<R>,
    current: Quote,
    clipboard: Box<dyn ClipboardSink>,
    share: Box<dyn ShareSink>,
    status: Option<StatusMessage>,
}

impl<R: Rng> App<R> {
    /// Build the screen and pick the first quote.
    pub fn new(
        store: QuoteStore,
        mut picker: QuotePicker<R>,
        clipboard: Box<dyn ClipboardSink>,
        share: Box<dyn ShareSink>,
    ) -> Result<Self> {
        let current = picker
            .pick(store.quotes())
            .cloned()
            .with_context(|| format!("no quote to show from {}", store.origin()))?;

        Ok(Self {
            store,
            picker,
            current,
            clipboard,
            share,
            status: None,
        })
    }

    pub fn current_quote(&self) -> &Quote {
        &self.current
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    /// Footer status text, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn set_current_quote(&mut self, quote: Quote) {
        self.current = quote;
    }

    /// Replace the displayed quote with a fresh random pick.
    pub fn next_quote(&mut self) -> Result<()> {
        let quote = self
            .picker
            .pick(self.store.quotes())
            .cloned()
            .context("failed to pick the next quote")?;
        tracing::debug!(author = %quote.author, "picked quote");
        self.set_current_quote(quote);
        Ok(())
    }

    /// Copy the formatted quote. Failures end up in the footer, not in `Err`.
    pub fn copy_current(&mut self) {
        let text = format_quote(&self.current);
        match self.clipboard.copy_text(&text) {
            Ok(()) => self.set_status("Quote copied!", StatusKind::Info),
            Err(err) => {
                tracing::warn!(error = %err, "copy failed");
                self.set_status(
                    format!("Copy failed: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    pub fn share_current(&mut self) {
        let text = format_quote(&self.current);
        match self.share.share_text(&text) {
            Ok(()) => self.set_status("Opened share target.", StatusKind::Info),
            Err(err) => {
                tracing::warn!(error = %err, "share failed");
                self.set_status(
                    format!("Share failed: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') | KeyCode::Enter => {
                self.clear_status();
                self.next_quote()?;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.copy_current(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.share_current(),
            _ => {}
        }
        Ok(false)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_quote_card(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::BOTTOM))
        .alignment(Alignment::Left);
        frame.render_widget(title, area);
    }

    fn draw_quote_card(&self, frame: &mut Frame, area: Rect) {
        let card_area = centered_rect(CARD_WIDTH_PERCENT, CARD_HEIGHT_PERCENT, area);
        let block = Block::default().borders(Borders::ALL).title(" Quote ");
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        let lines = quote_card_lines(&self.current);
        // Vertically center short quotes; long ones simply start at the top.
        let top_padding = inner.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect {
            y: inner.y + top_padding,
            height: inner.height - top_padding,
            ..inner
        };

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, text_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    #[cfg(test)]
    fn status_kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(|status| status.kind)
    }
}

fn footer_instructions() -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("[n]", key_style),
        Span::raw(" New Quote   "),
        Span::styled("[c]", key_style),
        Span::raw(" Copy   "),
        Span::styled("[s]", key_style),
        Span::raw(" Share   "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ])
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::share::ShareError;

    const DATASET: &str = r#"[
        {"quote":"A","author":"X"},
        {"quote":"B","author":"Y"},
        {"quote":"C","author":"Z"}
    ]"#;

    #[derive(Clone, Default)]
    struct Recorder {
        sent: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl ClipboardSink for Recorder {
        fn copy_text(&mut self, text: &str) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::Clipboard("no display".to_string()));
            }
            self.sent.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    impl ShareSink for Recorder {
        fn share_text(&mut self, text: &str) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::Launch(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no mail client",
                )));
            }
            self.sent.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn store() -> QuoteStore {
        QuoteStore::load(DATASET).expect("valid dataset")
    }

    fn app_with(seed: u64, clipboard: Recorder, share: Recorder) -> App<StdRng> {
        App::new(
            store(),
            QuotePicker::with_rng(StdRng::seed_from_u64(seed)),
            Box::new(clipboard),
            Box::new(share),
        )
        .expect("non-empty store")
    }

    #[test]
    fn initial_quote_comes_from_the_store() {
        let app = app_with(3, Recorder::default(), Recorder::default());
        assert!(app.store().quotes().contains(app.current_quote()));
        assert!(app.status_text().is_none());
    }

    #[test]
    fn next_key_follows_the_picker() {
        let quotes = store();
        let mut reference = QuotePicker::with_rng(StdRng::seed_from_u64(9));
        let first = reference.pick(quotes.quotes()).expect("non-empty").clone();
        let second = reference.pick(quotes.quotes()).expect("non-empty").clone();

        let mut app = app_with(9, Recorder::default(), Recorder::default());
        assert_eq!(app.current_quote(), &first);
        assert!(!app.handle_key(KeyCode::Char('n')).expect("key handled"));
        assert_eq!(app.current_quote(), &second);
    }

    #[test]
    fn unrelated_keys_leave_quote_alone() {
        let mut app = app_with(5, Recorder::default(), Recorder::default());
        let before = app.current_quote().clone();
        for code in [KeyCode::Char('x'), KeyCode::Up, KeyCode::Tab, KeyCode::Backspace] {
            assert!(!app.handle_key(code).expect("key handled"));
        }
        assert_eq!(app.current_quote(), &before);
        assert!(app.status_text().is_none());
    }

    #[test]
    fn set_current_quote_replaces_display() {
        let mut app = app_with(5, Recorder::default(), Recorder::default());
        app.set_current_quote(Quote::new("Manual", "Me"));
        assert_eq!(app.current_quote(), &Quote::new("Manual", "Me"));
    }

    #[test]
    fn copy_sends_formatted_text() {
        let clipboard = Recorder::default();
        let mut app = app_with(1, clipboard.clone(), Recorder::default());
        app.set_current_quote(Quote::new("Stay hungry.", "Anon"));

        app.handle_key(KeyCode::Char('c')).expect("key handled");

        assert_eq!(*clipboard.sent.borrow(), vec!["\"Stay hungry.\"\n- Anon"]);
        assert_eq!(app.status_text(), Some("Quote copied!"));
        assert_eq!(app.status_kind(), Some(StatusKind::Info));
    }

    #[test]
    fn share_sends_formatted_text() {
        let share = Recorder::default();
        let mut app = app_with(1, Recorder::default(), share.clone());
        let expected = format_quote(app.current_quote());

        app.handle_key(KeyCode::Char('s')).expect("key handled");

        assert_eq!(*share.sent.borrow(), vec![expected]);
        assert_eq!(app.status_text(), Some("Opened share target."));
    }

    #[test]
    fn sink_failures_become_error_status() {
        let failing = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut app = app_with(1, failing.clone(), failing);

        app.copy_current();
        assert_eq!(app.status_text(), Some("Copy failed: clipboard unavailable: no display"));
        assert_eq!(app.status_kind(), Some(StatusKind::Error));

        app.share_current();
        assert_eq!(app.status_text(), Some("Share failed: no mail client"));
    }

    #[test]
    fn next_clears_previous_status() {
        let mut app = app_with(1, Recorder::default(), Recorder::default());
        app.copy_current();
        assert!(app.status_text().is_some());
        app.handle_key(KeyCode::Enter).expect("key handled");
        assert!(app.status_text().is_none());
    }

    #[test]
    fn quit_keys_exit() {
        let mut app = app_with(1, Recorder::default(), Recorder::default());
        assert!(app.handle_key(KeyCode::Char('q')).expect("key handled"));
        assert!(app.handle_key(KeyCode::Esc).expect("key handled"));
    }

    #[test]
    fn draw_renders_title_quote_and_author() {
        let mut app = app_with(1, Recorder::default(), Recorder::default());
        app.set_current_quote(Quote::new("Stay hungry.", "Anon"));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains(APP_TITLE));
        assert!(rendered.contains("\u{201c}Stay hungry.\u{201d}"));
        assert!(rendered.contains("- Anon"));
        assert!(rendered.contains("New Quote"));
    }
}
