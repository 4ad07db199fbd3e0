use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub const TICK_RATE: Duration = Duration::from_millis(250);

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Terminal input read on a background thread and handed to the UI loop.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Release/repeat events would double-submit answers.
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key))
                        }
                        Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
                        Ok(_) => None,
                        Err(e) => {
                            log::warn!("terminal event read failed: {e}");
                            None
                        }
                    }
                } else {
                    Some(AppEvent::Tick)
                };

                if let Some(event) = event
                    && tx.send(event).is_err()
                {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
