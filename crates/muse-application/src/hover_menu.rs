//! Debounced open/close scheduling for the shared hover options tray.
//!
//! A single tray serves many hover anchors (post cards, logo candidates).
//! Opening is immediate; only closing is delayed, so the pointer can travel
//! from an anchor into the tray without flicker. Every armed close timer is
//! held as a `CancellationToken` and cancelled before a new one is armed,
//! which rules out stale timers closing a tray that was re-opened since.

use muse_core::event::{EventSink, StudioEvent};
use muse_core::menu::{HoverMenuState, MenuPhase, TrayPosition};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

struct MenuInner {
    state: HoverMenuState,
    /// Token for the armed close timer, if any. Cancelled before reuse.
    close_token: Option<CancellationToken>,
    /// Bumped every time a close timer is armed; a firing timer only
    /// applies if its generation is still current.
    generation: u64,
}

/// Manages the tray state machine `Closed -> Open -> ClosingDelay -> Closed`
/// across all anchors, emitting `MenuStateChanged` on every transition.
pub struct HoverMenuService {
    inner: Arc<Mutex<MenuInner>>,
    close_delay: Duration,
    events: Arc<dyn EventSink>,
}

impl HoverMenuService {
    /// Creates a service with the given close debounce window.
    pub fn new(close_delay: Duration, events: Arc<dyn EventSink>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MenuInner {
                state: HoverMenuState::closed(),
                close_token: None,
                generation: 0,
            })),
            close_delay,
            events,
        }
    }

    /// Opens the tray for `anchor_id` immediately.
    ///
    /// Cancels any pending close timer first; if a different anchor was
    /// open, it is superseded in the same transition, so at most one tray
    /// is ever visible.
    pub async fn on_anchor_enter(&self, anchor_id: &str, position: TrayPosition) {
        let mut inner = self.inner.lock().await;
        if let Some(token) = inner.close_token.take() {
            token.cancel();
        }
        inner.state = HoverMenuState::open(anchor_id, position);
        self.events.emit(StudioEvent::MenuStateChanged {
            state: inner.state.clone(),
        });
    }

    /// Starts the close debounce window (pointer left the anchor).
    pub async fn on_anchor_leave(self: &Arc<Self>) {
        self.arm_close_timer().await;
    }

    /// Pointer moved from the anchor into the tray: keep it open.
    pub async fn on_tray_enter(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(token) = inner.close_token.take() {
            token.cancel();
        }
        if inner.state.phase == MenuPhase::ClosingDelay {
            inner.state.phase = MenuPhase::Open;
            self.events.emit(StudioEvent::MenuStateChanged {
                state: inner.state.clone(),
            });
        }
    }

    /// Pointer left the tray: same debounce as leaving the anchor.
    pub async fn on_tray_leave(self: &Arc<Self>) {
        self.arm_close_timer().await;
    }

    /// Closes immediately, cancelling any pending timer.
    pub async fn on_explicit_close(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(token) = inner.close_token.take() {
            token.cancel();
        }
        if inner.state.is_visible() {
            inner.state = HoverMenuState::closed();
            self.events.emit(StudioEvent::MenuStateChanged {
                state: inner.state.clone(),
            });
        }
    }

    /// Snapshot of the current tray state.
    pub async fn state(&self) -> HoverMenuState {
        self.inner.lock().await.state.clone()
    }

    async fn arm_close_timer(self: &Arc<Self>) {
        let mut inner = self.inner.lock().await;
        if !inner.state.is_visible() {
            return;
        }
        // Cancel-before-start: the previous timer must never outlive this one
        if let Some(token) = inner.close_token.take() {
            token.cancel();
        }
        let token = CancellationToken::new();
        inner.close_token = Some(token.clone());
        inner.generation += 1;
        let generation = inner.generation;

        if inner.state.phase != MenuPhase::ClosingDelay {
            inner.state.phase = MenuPhase::ClosingDelay;
            self.events.emit(StudioEvent::MenuStateChanged {
                state: inner.state.clone(),
            });
        }
        drop(inner);

        let service = Arc::clone(self);
        let delay = self.close_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    service.finish_close(generation).await;
                }
            }
        });
    }

    async fn finish_close(&self, generation: u64) {
        let mut inner = self.inner.lock().await;
        // A newer hover re-armed or cancelled since this timer was started
        if inner.generation != generation || inner.state.phase != MenuPhase::ClosingDelay {
            return;
        }
        inner.close_token = None;
        inner.state = HoverMenuState::closed();
        self.events.emit(StudioEvent::MenuStateChanged {
            state: inner.state.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    struct RecordingSink {
        events: StdMutex<Vec<StudioEvent>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: StdMutex::new(Vec::new()),
            })
        }

        fn menu_phases(&self) -> Vec<MenuPhase> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    StudioEvent::MenuStateChanged { state } => Some(state.phase),
                    _ => None,
                })
                .collect()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: StudioEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn service(sink: Arc<RecordingSink>) -> Arc<HoverMenuService> {
        Arc::new(HoverMenuService::new(Duration::from_millis(300), sink))
    }

    fn at(x: f32, y: f32) -> TrayPosition {
        TrayPosition { x, y }
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_is_immediate_and_close_is_delayed() {
        let sink = RecordingSink::new();
        let menu = service(sink.clone());

        menu.on_anchor_enter("card-1", at(10.0, 20.0)).await;
        assert_eq!(menu.state().await.phase, MenuPhase::Open);

        menu.on_anchor_leave().await;
        assert_eq!(menu.state().await.phase, MenuPhase::ClosingDelay);

        // Still visible inside the debounce window
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(menu.state().await.is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(menu.state().await.phase, MenuPhase::Closed);
        assert_eq!(
            sink.menu_phases(),
            vec![MenuPhase::Open, MenuPhase::ClosingDelay, MenuPhase::Closed]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_anchor_supersedes_pending_close() {
        let sink = RecordingSink::new();
        let menu = service(sink.clone());

        menu.on_anchor_enter("card-a", at(0.0, 0.0)).await;
        menu.on_anchor_leave().await;

        // Enter anchor B before A's close delay elapses
        tokio::time::sleep(Duration::from_millis(100)).await;
        menu.on_anchor_enter("card-b", at(50.0, 0.0)).await;

        // Well past A's original deadline: B must still be open
        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;

        let state = menu.state().await;
        assert_eq!(state.phase, MenuPhase::Open);
        assert_eq!(state.anchor_id.as_deref(), Some("card-b"));
        // A's timer never fired a close
        assert!(!sink.menu_phases().contains(&MenuPhase::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tray_enter_cancels_close() {
        let sink = RecordingSink::new();
        let menu = service(sink.clone());

        menu.on_anchor_enter("card-1", at(0.0, 0.0)).await;
        menu.on_anchor_leave().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        menu.on_tray_enter().await;

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(menu.state().await.phase, MenuPhase::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tray_leave_closes_after_delay() {
        let sink = RecordingSink::new();
        let menu = service(sink.clone());

        menu.on_anchor_enter("card-1", at(0.0, 0.0)).await;
        menu.on_anchor_leave().await;
        menu.on_tray_enter().await;
        menu.on_tray_leave().await;

        tokio::time::sleep(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;
        assert_eq!(menu.state().await.phase, MenuPhase::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_close_is_immediate() {
        let sink = RecordingSink::new();
        let menu = service(sink.clone());

        menu.on_anchor_enter("card-1", at(0.0, 0.0)).await;
        menu.on_explicit_close().await;
        assert_eq!(menu.state().await.phase, MenuPhase::Closed);

        // No stray timer resurrects or re-closes the tray
        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            sink.menu_phases(),
            vec![MenuPhase::Open, MenuPhase::Closed]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_when_closed_is_noop() {
        let sink = RecordingSink::new();
        let menu = service(sink.clone());

        menu.on_anchor_leave().await;
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(menu.state().await.phase, MenuPhase::Closed);
        assert!(sink.menu_phases().is_empty());
    }
}
