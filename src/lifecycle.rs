// Scoped tick and input subscriptions
//
// Both are acquired together when the animator is mounted and released together
// on teardown. They feed the main thread through a single channel; the main
// thread is the only writer of grid state. At most one tick is queued at a time.

use crate::errors::{FogError, FogResult};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Everything the main loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// New terminal size in character cells (columns, rows)
    Resize(u16, u16),
    /// The input listener died; nothing can reach the app from the keyboard
    InputClosed(String),
}

/// Recurring tick on a fixed wall-clock interval
pub struct TickSubscription {
    interval: Duration,
    pending: Arc<AtomicBool>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickSubscription {
    pub fn start(interval: Duration, events: Sender<AppEvent>) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let pending = Arc::new(AtomicBool::new(false));
        let queued = pending.clone();
        let handle = thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                let wait = next.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {
                        // previous tick not consumed yet: drop this one
                        if !queued.swap(true, Ordering::AcqRel) && events.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        next += interval;
                        // fell behind (suspended terminal, slow draw); skip, don't burst
                        let now = Instant::now();
                        if next < now {
                            next = now + interval;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("tick subscription exited");
        });
        Self {
            interval,
            pending,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the queued tick as consumed so the timer may send the next one
    pub fn acknowledge(&self) {
        self.pending.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }

    /// Cancel the timer and wait for its thread
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("tick thread panicked");
            }
        }
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Terminal key, mouse and resize events
pub struct InputSubscription {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputSubscription {
    pub fn start(events: Sender<AppEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match event::poll(INPUT_POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        warn!("input poll failed: {}", e);
                        let _ = events.send(AppEvent::InputClosed(format!("poll failed: {}", e)));
                        break;
                    }
                }
                let forwarded = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                    Ok(Event::Mouse(mouse)) => Some(AppEvent::Mouse(mouse)),
                    Ok(Event::Resize(cols, rows)) => Some(AppEvent::Resize(cols, rows)),
                    Ok(_) => None,
                    Err(e) => {
                        warn!("input read failed: {}", e);
                        let _ = events.send(AppEvent::InputClosed(format!("read failed: {}", e)));
                        break;
                    }
                };
                if let Some(app_event) = forwarded {
                    if events.send(app_event).is_err() {
                        break;
                    }
                }
            }
            debug!("input subscription exited");
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("input thread panicked");
            }
        }
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The animator's scoped resources, released together
pub struct Lifecycle {
    events: Receiver<AppEvent>,
    sender: Sender<AppEvent>,
    tick: TickSubscription,
    input: Option<InputSubscription>,
}

impl Lifecycle {
    /// Acquire the tick timer and the terminal input listener
    pub fn start(tick_interval: Duration) -> Self {
        let mut lifecycle = Self::ticks_only(tick_interval);
        lifecycle.input = Some(InputSubscription::start(lifecycle.sender.clone()));
        info!("lifecycle started (tick every {:?}, input attached)", tick_interval);
        lifecycle
    }

    /// Tick timer without a terminal listener
    pub fn ticks_only(tick_interval: Duration) -> Self {
        let (sender, events) = mpsc::channel();
        let tick = TickSubscription::start(tick_interval, sender.clone());
        Self {
            events,
            sender,
            tick,
            input: None,
        }
    }

    /// Extra producer handle, used to inject events
    pub fn sender(&self) -> Sender<AppEvent> {
        self.sender.clone()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick.interval()
    }

    /// Block until the next event
    pub fn next_event(&self) -> FogResult<AppEvent> {
        let event = self
            .events
            .recv()
            .map_err(|_| FogError::SubscriptionError("event channel closed".to_string()))?;
        self.received(event)
    }

    /// Like `next_event` but gives up after `timeout`
    pub fn next_event_timeout(&self, timeout: Duration) -> FogResult<Option<AppEvent>> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => self.received(event).map(Some),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(FogError::SubscriptionError(
                "event channel closed".to_string(),
            )),
        }
    }

    /// Block for one event, then drain whatever else is queued.
    /// A batch never holds more than one tick.
    pub fn next_batch(&self) -> FogResult<Vec<AppEvent>> {
        let mut batch = vec![self.next_event()?];
        let mut has_tick = batch[0] == AppEvent::Tick;
        for event in self.events.try_iter() {
            let event = self.received(event)?;
            if event == AppEvent::Tick {
                if has_tick {
                    continue;
                }
                has_tick = true;
            }
            batch.push(event);
        }
        Ok(batch)
    }

    fn received(&self, event: AppEvent) -> FogResult<AppEvent> {
        match event {
            AppEvent::Tick => {
                self.tick.acknowledge();
                Ok(AppEvent::Tick)
            }
            AppEvent::InputClosed(reason) => Err(FogError::SubscriptionError(format!(
                "input listener stopped: {}",
                reason
            ))),
            other => Ok(other),
        }
    }

    /// Teardown: cancel the timer and unsubscribe from input
    pub fn stop(self) {
        drop(self);
    }

    fn release(&mut self) {
        self.tick.stop();
        if let Some(mut input) = self.input.take() {
            input.stop();
        }
        info!("lifecycle stopped");
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_subscription_delivers_and_stops() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = TickSubscription::start(Duration::from_millis(5), tx);
        let first = rx.recv_timeout(Duration::from_secs(2));
        assert_eq!(first, Ok(AppEvent::Tick));
        ticker.stop();
        assert!(!ticker.is_running());
        // drain anything sent before the stop landed, then the channel is dead
        while rx.try_recv().is_ok() {}
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn test_lifecycle_ticks_and_injected_events() {
        let lifecycle = Lifecycle::ticks_only(Duration::from_millis(5));
        lifecycle.sender().send(AppEvent::Resize(100, 40)).unwrap();
        let mut saw_resize = false;
        let mut saw_tick = false;
        for _ in 0..50 {
            match lifecycle.next_event_timeout(Duration::from_millis(200)).unwrap() {
                Some(AppEvent::Resize(100, 40)) => saw_resize = true,
                Some(AppEvent::Tick) => saw_tick = true,
                _ => {}
            }
            if saw_resize && saw_tick {
                break;
            }
        }
        assert!(saw_resize && saw_tick);
        lifecycle.stop();
    }

    #[test]
    fn test_stalled_consumer_sees_one_tick() {
        let lifecycle = Lifecycle::ticks_only(Duration::from_millis(5));
        // main thread busy for many intervals
        thread::sleep(Duration::from_millis(300));
        let batch = lifecycle.next_batch().unwrap();
        let ticks = batch.iter().filter(|e| **e == AppEvent::Tick).count();
        assert_eq!(ticks, 1);

        // after consuming, the timer resumes
        let next = lifecycle.next_event_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(next, Some(AppEvent::Tick));
        lifecycle.stop();
    }

    #[test]
    fn test_unacknowledged_tick_blocks_the_next() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = TickSubscription::start(Duration::from_millis(5), tx);
        thread::sleep(Duration::from_millis(100));
        ticker.stop();
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_input_closed_ends_the_loop() {
        let lifecycle = Lifecycle::ticks_only(Duration::from_secs(60));
        lifecycle
            .sender()
            .send(AppEvent::InputClosed("poll failed".to_string()))
            .unwrap();
        let err = lifecycle.next_batch().unwrap_err();
        assert!(matches!(err, FogError::SubscriptionError(ref msg) if msg.contains("poll failed")));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (tx, _rx) = mpsc::channel();
        let mut ticker = TickSubscription::start(Duration::from_millis(50), tx);
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
    }
}
