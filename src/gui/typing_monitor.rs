use std::{
    io::stdout,
    sync::mpsc,
    thread::{sleep, spawn},
    time::Duration,
};

use crate::decoder::{BrailleDecoder, BrailleEvent};
use crate::frame_queue::FrameQueue;
use crate::gui::error::BoardGuiError;
use crate::typed_line::TypedLine;

use crossterm::{
    event::{self, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};

use ratatui::{
    prelude::*,
    widgets::{block::Title, *},
    Terminal,
};

enum ThreadMessage {
    Stop,
}

/// What the decoding thread reports after each batch of frames.
struct Snapshot {
    line: TypedLine,
    last_event: BrailleEvent,
}

/// Shows what the learner is typing until a key is pressed on the computer.
///
/// A worker thread drains `frames`, decodes them with `decoder` and applies
/// the events to a [TypedLine]; this thread only draws. The final line is
/// returned once the user stops.
pub fn typing_monitor(
    mut frames: FrameQueue,
    decoder: BrailleDecoder,
) -> Result<TypedLine, BoardGuiError> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let (stop_tx, stop_rx) = mpsc::channel();
    let (snapshot_tx, snapshot_rx) = mpsc::channel();

    let th = spawn(move || {
        let mut line = TypedLine::new();

        loop {
            let mut last_event = None;
            for frame in frames.by_ref() {
                let event = decoder.decode(frame);
                line.apply(&event);
                last_event = Some(event);
            }
            if let Some(last_event) = last_event {
                let snapshot = Snapshot {
                    line: line.clone(),
                    last_event,
                };
                if snapshot_tx.send(snapshot).is_err() {
                    break;
                }
            }
            if let Ok(ThreadMessage::Stop) = stop_rx.try_recv() {
                break;
            }
            sleep(Duration::from_millis(5));
        }

        line
    });

    let mut shown = TypedLine::new();
    let mut last_event = None;
    loop {
        for snapshot in snapshot_rx.try_iter() {
            shown = snapshot.line;
            last_event = Some(snapshot.last_event);
        }

        let title = Title::from(Span::styled(
            format!(" Typing {} ", decoder.mode()),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
        let last = last_event.map_or_else(|| "-".to_owned(), |e| e.to_string());
        let text = Paragraph::new(vec![
            Line::from(vec![" Braille ".magenta().bold(), shown.glyphs().into()]),
            Line::from(vec![" Text    ".magenta().bold(), shown.text().into()]),
            Line::from(vec![" Last    ".magenta().bold(), last.into()]),
            Line::from(""),
            Line::from(" Press any key to stop "),
        ]);
        let block = Block::default()
            .title(title.alignment(Alignment::Center))
            .borders(Borders::ALL);
        terminal.draw(|frame| {
            let area = frame.size();
            frame.render_widget(text.block(block), area);
        })?;
        if event::poll(Duration::from_millis(16))? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
    }

    stop_tx.send(ThreadMessage::Stop)?;
    let line = th.join().map_err(|_| BoardGuiError::JoinError)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(line)
}
