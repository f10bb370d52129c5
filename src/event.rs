use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, MouseEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            pump(
                || {
                    if event::poll(tick_rate)? {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                },
                &tx,
            )
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Forwards terminal events until the receiver goes away. `Ok(None)` means the
/// poll timed out. A failed read is logged and skipped so the UI keeps ticking.
fn pump<F>(mut read_next: F, tx: &mpsc::Sender<AppEvent>)
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    loop {
        let next = match read_next() {
            Ok(Some(Event::Key(key))) => AppEvent::Key(key),
            Ok(Some(Event::Mouse(mouse))) => AppEvent::Mouse(mouse),
            Ok(Some(Event::Resize(w, h))) => AppEvent::Resize(w, h),
            Ok(Some(_)) => continue,
            Ok(None) => AppEvent::Tick,
            Err(e) => {
                log::error!("terminal event read failed: {e}");
                continue;
            }
        };
        if tx.send(next).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_read_error_does_not_stop_events() {
        let (tx, rx) = mpsc::channel();
        let mut calls = 0;
        let worker = thread::spawn(move || {
            pump(
                move || {
                    calls += 1;
                    match calls {
                        1 => Err(io::Error::other("tty hiccup")),
                        2 => Ok(Some(Event::FocusGained)),
                        3 => Ok(Some(Event::Key(KeyEvent::new(
                            KeyCode::Char(' '),
                            KeyModifiers::NONE,
                        )))),
                        _ => Ok(None),
                    }
                },
                &tx,
            )
        });

        match rx.recv().unwrap() {
            AppEvent::Key(key) => assert_eq!(key.code, KeyCode::Char(' ')),
            _ => panic!("expected the key after the failed read"),
        }
        assert!(matches!(rx.recv().unwrap(), AppEvent::Tick));

        drop(rx);
        worker.join().unwrap();
    }
}
