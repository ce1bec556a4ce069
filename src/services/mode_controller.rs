use crate::config::MarksConfig;
use crate::events::{ControlEvent, Intent, Notification};
use crate::marks::{CycleCursor, Direction, MarkStore, Resolver, Slot};
use crate::services::notifier::Notifier;
use crate::services::ticker::TickScheduler;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Whether the next slot event captures or switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    MarkPending { since: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSettings {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl From<&MarksConfig> for ModeSettings {
    fn from(config: &MarksConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.mark_mode_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Interprets intents against the current mode and drives the mark store,
/// resolver and cycle cursor. The only place mark-mode semantics are decided.
pub struct ModeController {
    store: MarkStore,
    resolver: Resolver,
    cycle: CycleCursor,
    ticker: Box<dyn TickScheduler>,
    notifier: Notifier,
    settings: ModeSettings,
    mode: Mode,
}

impl ModeController {
    pub fn new(
        store: MarkStore,
        resolver: Resolver,
        ticker: Box<dyn TickScheduler>,
        notifier: Notifier,
        settings: ModeSettings,
    ) -> Self {
        Self {
            store,
            resolver,
            cycle: CycleCursor::new(),
            ticker,
            notifier,
            settings,
            mode: Mode::Idle,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &MarkStore {
        &self.store
    }

    pub fn cycle(&self) -> &CycleCursor {
        &self.cycle
    }

    pub fn handle_event(&mut self, event: ControlEvent, now: Instant) {
        match event {
            ControlEvent::Intent(intent) => self.handle_intent(intent, now),
            ControlEvent::Tick => self.tick(now),
        }
    }

    pub fn handle_intent(&mut self, intent: Intent, now: Instant) {
        debug!("Intent {} in {:?}", intent, self.mode);

        match (intent, self.mode) {
            (Intent::ActivateMarkMode, _) => self.enter_mark_mode(now),

            (Intent::Slot(slot), Mode::MarkPending { .. }) => {
                if self.store.capture(slot.get(), self.resolver.registry()).is_none() {
                    info!("Nothing captured for slot {}", slot);
                }
                self.exit_mark_mode();
            }
            (Intent::Slot(slot), Mode::Idle) => {
                if !self.switch_to(slot) {
                    self.notifier.publish(Notification::SwitchFailed(slot));
                }
            }

            (Intent::ClearAll, Mode::MarkPending { .. }) => {
                if self.store.clear_all() {
                    self.cycle.reset();
                }
                self.exit_mark_mode();
            }
            (Intent::ClearAll, Mode::Idle) => {
                debug!("clear-all ignored outside mark mode");
            }

            (Intent::ClearSlot(slot), _) => {
                self.store.clear(slot.get());
            }

            (Intent::CycleNext, _) => {
                self.cycle_next();
            }
            (Intent::CyclePrev, _) => {
                self.cycle_prev();
            }

            (Intent::ShowOverlay, _) => {
                let bindings = self.store.all().cloned().collect();
                self.notifier.publish(Notification::OverlayRequested(bindings));
            }
        }
    }

    /// Periodic check that drops out of mark mode once the timeout elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Mode::MarkPending { since } = self.mode {
            if now.saturating_duration_since(since) >= self.settings.timeout {
                info!("Mark mode timed out");
                self.exit_mark_mode();
                self.notifier.publish(Notification::MarkModeExpired);
            }
        }
    }

    /// Resolves the binding at `slot` and focuses its window.
    pub fn switch_to(&mut self, slot: Slot) -> bool {
        let Some(binding) = self.store.get(slot.get()) else {
            debug!("Slot {} is empty", slot);
            return false;
        };

        let cached = binding.window_handle;
        let Some(handle) = self.resolver.resolve(binding) else {
            return false;
        };

        if cached != Some(handle) {
            self.store.cache_handle(slot, handle);
        }

        let activated = self.resolver.registry().activate(handle);
        if activated {
            info!("Switched to slot {} ({})", slot, handle);
        }
        activated
    }

    pub fn cycle_next(&mut self) -> bool {
        self.cycle_step(Direction::Next)
    }

    pub fn cycle_prev(&mut self) -> bool {
        self.cycle_step(Direction::Prev)
    }

    /// Stops the poll if mark mode is still active at shutdown.
    pub fn shutdown(&mut self) {
        if matches!(self.mode, Mode::MarkPending { .. }) {
            self.exit_mark_mode();
        }
    }

    fn cycle_step(&mut self, direction: Direction) -> bool {
        let occupied = self.store.occupied_slots();
        let Some(slot) = self.cycle.advance(&occupied, direction) else {
            self.notifier.publish(Notification::CycleEmpty);
            return false;
        };
        self.switch_to(slot)
    }

    fn enter_mark_mode(&mut self, now: Instant) {
        match self.mode {
            Mode::Idle => {
                self.ticker.start(self.settings.poll_interval);
                info!("Mark mode on");
            }
            Mode::MarkPending { .. } => info!("Mark mode re-armed"),
        }
        self.mode = Mode::MarkPending { since: now };
        self.notifier.publish(Notification::MarkModeEntered);
    }

    fn exit_mark_mode(&mut self) {
        self.mode = Mode::Idle;
        self.ticker.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{WindowHandle, WindowInfo};
    use crate::marks::MarkStorage;
    use crate::test_support::{MockRegistry, RecordingTicker};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use tokio::sync::broadcast;

    struct Harness {
        controller: ModeController,
        registry: Arc<MockRegistry>,
        ticker: RecordingTicker,
        rx: broadcast::Receiver<Notification>,
        _dir: TempDir,
    }

    fn harness(registry: MockRegistry) -> Harness {
        let dir = tempdir().unwrap();
        let registry = Arc::new(registry);
        let notifier = Notifier::new();
        let rx = notifier.subscribe();
        let ticker = RecordingTicker::default();
        let store = MarkStore::load(MarkStorage::new(dir.path().join("marks.json")), notifier.clone());

        let controller = ModeController::new(
            store,
            Resolver::new(registry.clone()),
            Box::new(ticker.clone()),
            notifier,
            ModeSettings::default(),
        );

        Harness {
            controller,
            registry,
            ticker,
            rx,
            _dir: dir,
        }
    }

    fn slot(n: u8) -> Slot {
        Slot::new(n).unwrap()
    }

    fn desktop() -> MockRegistry {
        MockRegistry::new()
            .with_window(WindowInfo::new(WindowHandle(1), "main.rs - harpoon".into()).with_process("code"))
            .with_window(WindowInfo::new(WindowHandle(2), "Docs - Firefox".into()).with_process("firefox"))
            .with_window(WindowInfo::new(WindowHandle(3), "Inbox | Mail".into()).with_process("thunderbird"))
            .with_foreground(WindowHandle(1))
    }

    fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
        let mut seen = Vec::new();
        while let Ok(n) = rx.try_recv() {
            seen.push(n);
        }
        seen
    }

    /// Marks `handle` into `n` through the normal mark-mode flow.
    fn mark(h: &mut Harness, n: u8, handle: WindowHandle) {
        h.registry.set_foreground(Some(handle));
        let now = Instant::now();
        h.controller.handle_intent(Intent::ActivateMarkMode, now);
        h.controller.handle_intent(Intent::Slot(slot(n)), now);
    }

    #[test]
    fn test_mark_mode_then_slot_captures_once() {
        let mut h = harness(desktop());
        let now = Instant::now();

        h.controller.handle_intent(Intent::ActivateMarkMode, now);
        assert!(matches!(h.controller.mode(), Mode::MarkPending { .. }));
        assert!(h.ticker.is_running());

        h.controller.handle_intent(Intent::Slot(slot(3)), now);

        assert_eq!(h.controller.mode(), Mode::Idle);
        assert_eq!(h.controller.store().count(), 1);
        assert_eq!(h.controller.store().get(3).unwrap().process_name, "code");
        assert_eq!(h.registry.foreground_calls(), 1);
        assert_eq!(h.ticker.starts(), 1);
        assert_eq!(h.ticker.stops(), 1);

        let captured: Vec<_> = drain(&mut h.rx)
            .into_iter()
            .filter(|n| matches!(n, Notification::MarkCaptured { .. }))
            .collect();
        assert_eq!(captured.len(), 1);
    }

    #[test]
    fn test_mark_mode_times_out_without_mutation() {
        let mut h = harness(desktop());
        let start = Instant::now();
        h.controller.handle_intent(Intent::ActivateMarkMode, start);

        h.controller.tick(start + Duration::from_millis(2900));
        assert!(matches!(h.controller.mode(), Mode::MarkPending { .. }));

        h.controller.tick(start + Duration::from_secs(3));
        assert_eq!(h.controller.mode(), Mode::Idle);
        assert!(h.controller.store().is_empty());
        assert_eq!(h.ticker.stops(), 1);

        // Later ticks are harmless and do not stop again.
        h.controller.tick(start + Duration::from_secs(4));
        assert_eq!(h.ticker.stops(), 1);

        let seen = drain(&mut h.rx);
        assert_eq!(seen, vec![Notification::MarkModeEntered, Notification::MarkModeExpired]);
    }

    #[test]
    fn test_repeat_activation_rearms_without_second_start() {
        let mut h = harness(desktop());
        let start = Instant::now();

        h.controller.handle_intent(Intent::ActivateMarkMode, start);
        h.controller.handle_intent(Intent::ActivateMarkMode, start + Duration::from_secs(2));
        h.controller.tick(start + Duration::from_secs(4));

        assert!(matches!(h.controller.mode(), Mode::MarkPending { .. }));
        assert_eq!(h.ticker.starts(), 1);

        h.controller.tick(start + Duration::from_secs(5));
        assert_eq!(h.controller.mode(), Mode::Idle);
    }

    #[test]
    fn test_idle_slot_switches_to_window() {
        let mut h = harness(desktop());
        mark(&mut h, 2, WindowHandle(2));
        h.registry.set_foreground(Some(WindowHandle(1)));

        h.controller.handle_intent(Intent::Slot(slot(2)), Instant::now());

        assert_eq!(h.registry.activated(), vec![WindowHandle(2)]);
        assert_eq!(h.registry.enumerate_calls(), 0);
    }

    #[test]
    fn test_switch_re_resolves_recreated_window() {
        let mut h = harness(desktop());
        mark(&mut h, 1, WindowHandle(2));

        // Browser restarted: same title, new handle.
        h.registry.remove_window(WindowHandle(2));
        h.registry
            .add_window(WindowInfo::new(WindowHandle(20), "Docs - Firefox".into()).with_process("firefox"));

        assert!(h.controller.switch_to(slot(1)));
        assert_eq!(h.registry.activated(), vec![WindowHandle(20)]);
        assert_eq!(h.controller.store().get(1).unwrap().window_handle, Some(WindowHandle(20)));

        // Second switch uses the cached handle.
        assert!(h.controller.switch_to(slot(1)));
        assert_eq!(h.registry.enumerate_calls(), 1);
    }

    #[test]
    fn test_switch_failure_is_reported() {
        let mut h = harness(desktop());
        mark(&mut h, 4, WindowHandle(3));
        h.registry.remove_window(WindowHandle(3));
        drain(&mut h.rx);

        h.controller.handle_intent(Intent::Slot(slot(4)), Instant::now());
        h.controller.handle_intent(Intent::Slot(slot(5)), Instant::now());

        assert!(h.registry.activated().is_empty());
        assert_eq!(
            drain(&mut h.rx),
            vec![
                Notification::SwitchFailed(slot(4)),
                Notification::SwitchFailed(slot(5))
            ]
        );
        assert_eq!(h.controller.store().count(), 1);
    }

    #[test]
    fn test_cycle_over_empty_store_fails_without_switching() {
        let mut h = harness(desktop());

        assert!(!h.controller.cycle_next());
        assert!(!h.controller.cycle_prev());
        assert!(h.registry.activated().is_empty());
        assert_eq!(h.controller.cycle().index(), None);
        assert_eq!(drain(&mut h.rx), vec![Notification::CycleEmpty, Notification::CycleEmpty]);
    }

    #[test]
    fn test_cycle_visits_slots_in_order() {
        let mut h = harness(desktop());
        mark(&mut h, 7, WindowHandle(3));
        mark(&mut h, 2, WindowHandle(1));
        mark(&mut h, 5, WindowHandle(2));

        for _ in 0..4 {
            assert!(h.controller.cycle_next());
        }
        assert_eq!(
            h.registry.activated(),
            vec![WindowHandle(1), WindowHandle(2), WindowHandle(3), WindowHandle(1)]
        );
    }

    #[test]
    fn test_clear_all_only_in_mark_mode_and_resets_cursor() {
        let mut h = harness(desktop());
        mark(&mut h, 1, WindowHandle(1));
        mark(&mut h, 2, WindowHandle(2));
        h.controller.cycle_next();
        assert_eq!(h.controller.cycle().index(), Some(0));

        h.controller.handle_intent(Intent::ClearAll, Instant::now());
        assert_eq!(h.controller.store().count(), 2);

        h.controller.handle_intent(Intent::ActivateMarkMode, Instant::now());
        h.controller.handle_intent(Intent::ClearAll, Instant::now());

        assert!(h.controller.store().is_empty());
        assert_eq!(h.controller.cycle().index(), None);
        assert_eq!(h.controller.mode(), Mode::Idle);
    }

    #[test]
    fn test_clear_slot_works_in_any_mode() {
        let mut h = harness(desktop());
        mark(&mut h, 1, WindowHandle(1));
        mark(&mut h, 2, WindowHandle(2));

        h.controller.handle_intent(Intent::ClearSlot(slot(1)), Instant::now());
        assert!(h.controller.store().get(1).is_none());

        h.controller.handle_intent(Intent::ActivateMarkMode, Instant::now());
        h.controller.handle_intent(Intent::ClearSlot(slot(2)), Instant::now());
        assert!(h.controller.store().is_empty());
        assert!(matches!(h.controller.mode(), Mode::MarkPending { .. }));
    }

    #[test]
    fn test_overlay_lists_marks() {
        let mut h = harness(desktop());
        mark(&mut h, 6, WindowHandle(3));
        drain(&mut h.rx);

        h.controller.handle_intent(Intent::ShowOverlay, Instant::now());

        match drain(&mut h.rx).as_slice() {
            [Notification::OverlayRequested(bindings)] => {
                assert_eq!(bindings.len(), 1);
                assert_eq!(bindings[0].title_pattern, "Inbox");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_shutdown_stops_pending_ticker() {
        let mut h = harness(desktop());
        h.controller.handle_event(ControlEvent::Intent(Intent::ActivateMarkMode), Instant::now());
        h.controller.shutdown();
        h.controller.shutdown();

        assert_eq!(h.ticker.stops(), 1);
        assert!(!h.ticker.is_running());
    }
}
