use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The centralized event loop that drives the UI thread.
///
/// It is the only place that calls `driver.poll()` / `driver.read()`; the
/// handler closure routes each event and draws on idle ticks. The handler is
/// called with `Some(event)` for input and `None` when the poll interval
/// elapses, which is where finalize ticks and redraws happen.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain the queue so high-frequency bursts (mouse drags)
                // don't fall behind a draw per event.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct ScriptedDriver {
        events: VecDeque<Event>,
    }

    impl InputDriver for ScriptedDriver {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn run_dispatches_scripted_events_then_quits() {
        let driver = ScriptedDriver {
            events: VecDeque::from([
                Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
                Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            ]),
        };
        let mut seen = Vec::new();
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        event_loop
            .run(|_driver, event| {
                if let Some(Event::Key(key)) = event {
                    seen.push(key.code);
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(ControlFlow::Quit);
                    }
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(seen, vec![KeyCode::Char('a'), KeyCode::Char('q')]);
    }
}
