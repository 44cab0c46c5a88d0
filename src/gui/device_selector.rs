use std::{io::stdout, path::PathBuf, time::Duration};

use crate::gui::error::BoardGuiError;

use crossterm::{
    event::{self, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::warn;
use ratatui::{
    prelude::*,
    widgets::{
        block::{Position, Title},
        *,
    },
    Terminal,
};

/// What a key press did to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerStep {
    Continue,
    Picked(usize),
    Quit,
}

/// Cursor over a non-empty list of ports, wrapping at both ends.
#[derive(Debug)]
struct PortPicker {
    cursor: usize,
    n_ports: usize,
}

impl PortPicker {
    fn new(n_ports: usize) -> Self {
        Self { cursor: 0, n_ports }
    }

    fn handle_key(&mut self, code: KeyCode) -> PickerStep {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1) % self.n_ports;
                PickerStep::Continue
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = (self.cursor + self.n_ports - 1) % self.n_ports;
                PickerStep::Continue
            }
            KeyCode::Enter => PickerStep::Picked(self.cursor),
            KeyCode::Char('q') | KeyCode::Esc => PickerStep::Quit,
            _ => PickerStep::Continue,
        }
    }
}

fn picker_frame() -> Block<'static> {
    let key = |text: &'static str| Span::styled(text, Style::new().magenta().bold());
    let help = Line::from(vec![
        " Move ".into(),
        key("<Up>/<Down>"),
        " Use port ".into(),
        key("<Enter>"),
        " Cancel ".into(),
        key("<Q> "),
    ]);
    Block::default()
        .title(
            Title::from(Span::styled(
                " Where is the Braille keyboard? ",
                Style::new().magenta().bold(),
            ))
            .alignment(Alignment::Center),
        )
        .title(
            Title::from(help)
                .alignment(Alignment::Center)
                .position(Position::Bottom),
        )
        .borders(Borders::ALL)
}

/// Lets the user pick the keyboard's serial port from `available_ports`.
/// Returns `None` if they quit, or if there was nothing to pick from.
pub fn device_selector(
    mut available_ports: Vec<PathBuf>,
) -> Result<Option<PathBuf>, BoardGuiError> {
    if available_ports.is_empty() {
        warn!("No serial ports found");
        return Ok(None);
    }
    let port_names: Vec<String> = available_ports
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut picker = PortPicker::new(available_ports.len());
    let mut list_state = ListState::default();
    let picked = loop {
        let list = List::new(port_names.iter().map(String::as_str))
            .style(Style::new().white())
            .highlight_symbol(">>")
            .highlight_style(Style::new().magenta())
            .block(picker_frame());
        list_state.select(Some(picker.cursor));
        terminal.draw(|frame| frame.render_stateful_widget(list, frame.size(), &mut list_state))?;

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        let event::Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match picker.handle_key(key.code) {
            PickerStep::Continue => {}
            PickerStep::Picked(i) => break Some(i),
            PickerStep::Quit => break None,
        }
    };

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(picked.map(|i| available_ports.swap_remove(i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut picker = PortPicker::new(3);
        assert_eq!(picker.handle_key(KeyCode::Up), PickerStep::Continue);
        assert_eq!(picker.cursor, 2);
        picker.handle_key(KeyCode::Down);
        picker.handle_key(KeyCode::Char('j'));
        assert_eq!(picker.cursor, 1);
        picker.handle_key(KeyCode::Char('k'));
        assert_eq!(picker.cursor, 0);
    }

    #[test]
    fn enter_picks_and_escape_quits() {
        let mut picker = PortPicker::new(2);
        picker.handle_key(KeyCode::Down);
        assert_eq!(picker.handle_key(KeyCode::Enter), PickerStep::Picked(1));
        assert_eq!(picker.handle_key(KeyCode::Esc), PickerStep::Quit);
        assert_eq!(picker.handle_key(KeyCode::Char('q')), PickerStep::Quit);
        assert_eq!(picker.handle_key(KeyCode::Char('x')), PickerStep::Continue);
    }

    #[test]
    fn no_ports_returns_without_touching_the_terminal() {
        assert!(device_selector(Vec::new()).unwrap().is_none());
    }
}
