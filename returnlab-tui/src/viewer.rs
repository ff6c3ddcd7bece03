//! Blocking full-screen chart viewer.
//!
//! `TerminalPlotter::plot` takes over the terminal (raw mode, alternate
//! screen), draws the chart, and returns once the user presses `q`, `Esc`
//! or `Enter`. The terminal is restored on every exit path.

use std::io::{self, stdout, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use returnlab_core::PriceTable;
use tracing::debug;

use crate::chart::LineChart;
use crate::plotter::{PlotError, PlotOptions, Plotter};
use crate::theme::Theme;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// What a key press means while a chart is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Dismiss,
    Interrupt,
    Ignore,
}

pub fn classify_key(key: KeyEvent) -> ViewerAction {
    if key.kind != KeyEventKind::Press {
        return ViewerAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            ViewerAction::Interrupt
        }
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => ViewerAction::Dismiss,
        _ => ViewerAction::Ignore,
    }
}

/// Restore the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));
}

#[derive(Default)]
pub struct TerminalPlotter {
    theme: Theme,
}

impl TerminalPlotter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Plotter for TerminalPlotter {
    fn plot(&mut self, table: &PriceTable, options: &PlotOptions) -> Result<(), PlotError> {
        if table.is_empty() {
            return Err(PlotError::EmptyTable {
                title: options.title.clone(),
            });
        }

        let mut terminal = enter()?;
        let result = run_viewer(&mut terminal, table, options, &self.theme);
        let restored = leave(&mut terminal);
        debug!(title = options.title.as_str(), "chart viewer closed");
        result.and(restored)
    }
}

fn enter() -> Result<CrosstermTerminal, PlotError> {
    enable_raw_mode()?;
    let setup = || -> io::Result<CrosstermTerminal> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(terminal)
    };
    restore_on_err(setup(), restore_terminal)
}

/// Run `restore` when terminal setup failed part way, then pass the error on.
fn restore_on_err<T>(
    result: io::Result<T>,
    restore: impl FnOnce(),
) -> Result<T, PlotError> {
    result.map_err(|e| {
        restore();
        PlotError::from(e)
    })
}

fn restore_terminal() {
    let _ = execute!(stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn leave(terminal: &mut CrosstermTerminal) -> Result<(), PlotError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_viewer(
    terminal: &mut CrosstermTerminal,
    table: &PriceTable,
    options: &PlotOptions,
    theme: &Theme,
) -> Result<(), PlotError> {
    loop {
        terminal.draw(|f| draw(f, table, options, theme))?;

        // Blocks until the next event; resizes fall through to a redraw.
        if let Event::Key(key) = event::read()? {
            match classify_key(key) {
                ViewerAction::Dismiss => return Ok(()),
                ViewerAction::Interrupt => return Err(PlotError::Interrupted),
                ViewerAction::Ignore => {}
            }
        }
    }
}

pub fn draw(f: &mut Frame, table: &PriceTable, options: &PlotOptions, theme: &Theme) {
    let [chart_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(f.area());

    f.render_widget(LineChart::new(table, options, theme), chart_area);

    let hint = Line::from(vec![
        Span::styled(" q / Esc / Enter", theme.caption_style()),
        Span::styled(": close chart and continue", theme.axis_style()),
    ]);
    f.render_widget(Paragraph::new(hint), hint_area);
}
