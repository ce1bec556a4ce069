//! In-memory doubles shared by unit tests.

use crate::error::Result;
use crate::events::{WindowHandle, WindowInfo};
use crate::services::ticker::TickScheduler;
use crate::services::window_registry::WindowRegistry;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scriptable window registry that records what the engine asked of it.
#[derive(Default)]
pub struct MockRegistry {
    windows: RwLock<Vec<WindowInfo>>,
    foreground: RwLock<Option<WindowHandle>>,
    activated: Mutex<Vec<WindowHandle>>,
    enumerate_calls: AtomicUsize,
    foreground_calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(self, window: WindowInfo) -> Self {
        self.add_window(window);
        self
    }

    pub fn with_foreground(self, handle: WindowHandle) -> Self {
        self.set_foreground(Some(handle));
        self
    }

    pub fn add_window(&self, window: WindowInfo) {
        self.windows.write().push(window);
    }

    pub fn remove_window(&self, handle: WindowHandle) {
        self.windows.write().retain(|w| w.handle != handle);
    }

    pub fn set_foreground(&self, handle: Option<WindowHandle>) {
        *self.foreground.write() = handle;
    }

    pub fn activated(&self) -> Vec<WindowHandle> {
        self.activated.lock().clone()
    }

    pub fn enumerate_calls(&self) -> usize {
        self.enumerate_calls.load(Ordering::SeqCst)
    }

    pub fn foreground_calls(&self) -> usize {
        self.foreground_calls.load(Ordering::SeqCst)
    }

    fn window(&self, handle: WindowHandle) -> Option<WindowInfo> {
        self.windows.read().iter().find(|w| w.handle == handle).cloned()
    }
}

impl WindowRegistry for MockRegistry {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground_calls.fetch_add(1, Ordering::SeqCst);
        *self.foreground.read()
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        self.window(handle).is_some_and(|w| w.visible)
    }

    fn title(&self, handle: WindowHandle) -> Option<String> {
        self.window(handle).map(|w| w.title)
    }

    fn process_name(&self, handle: WindowHandle) -> Option<String> {
        self.window(handle).and_then(|w| w.process_name)
    }

    fn activate(&self, handle: WindowHandle) -> bool {
        if !self.is_valid(handle) {
            return false;
        }
        self.activated.lock().push(handle);
        true
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        self.enumerate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.windows.read().clone())
    }
}

#[derive(Debug, Default)]
struct TickerState {
    running: bool,
    starts: usize,
    stops: usize,
}

/// Ticker that never fires; tests drive `tick()` by hand and inspect start/stop counts.
#[derive(Debug, Clone, Default)]
pub struct RecordingTicker {
    state: Arc<Mutex<TickerState>>,
}

impl RecordingTicker {
    pub fn starts(&self) -> usize {
        self.state.lock().starts
    }

    pub fn stops(&self) -> usize {
        self.state.lock().stops
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }
}

impl TickScheduler for RecordingTicker {
    fn start(&mut self, _interval: Duration) {
        let mut state = self.state.lock();
        state.running = true;
        state.starts += 1;
    }

    fn stop(&mut self) {
        let mut state = self.state.lock();
        if state.running {
            state.running = false;
            state.stops += 1;
        }
    }
}
