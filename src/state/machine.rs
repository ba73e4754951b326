//! Rest timer state machine
//!
//! `RestTimer::handle` is a pure transition function: it mutates the widget
//! state for one [`Event`] and returns the [`Effect`]s the driver has to carry
//! out (start/stop the ticker, schedule one-shot timers, play the cue, notify).
//! Nothing in here touches a clock or the host, so every transition can be
//! asserted without a runtime.

use std::time::Duration;

use tracing::{debug, info};

use super::{
    countdown::CountdownState,
    display::{DisplayMode, Position, Viewport},
    permission::NotificationPermission,
    settings::TimerSettings,
    snapshot::WidgetSnapshot,
};
use crate::{
    gesture::{Gesture, GestureClassifier, PointerEvent},
    services::Notice,
};

/// Identifies one scheduled one-shot timer; an elapsed report carrying any
/// other token than the pending one is stale and dropped.
pub type TimerToken = u64;

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Start/pause button
    Toggle,
    Reset,
    Increment,
    Decrement,
    Minimize,
    Expand,
    /// Click or tap anywhere outside the expanded widget
    OutsideInteraction,
    Pointer(PointerEvent),
    ViewportResized(Viewport),
    SetVisible(bool),
    /// User dismissed the widget
    Close,
    RequestPermission,
    Tick,
    AutoResetElapsed(TimerToken),
    AutoMinimizeElapsed(TimerToken),
    PermissionResolved(NotificationPermission),
}

/// Work the driver performs after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartTicker,
    StopTicker,
    ScheduleAutoReset { token: TimerToken, delay: Duration },
    CancelAutoReset,
    ScheduleAutoMinimize { token: TimerToken, delay: Duration },
    CancelAutoMinimize,
    PlayCue,
    Notify(Notice),
    RequestPermission,
    PositionCommitted(Position),
    InvokeClose,
}

#[derive(Debug, Clone)]
pub struct RestTimer {
    settings: TimerSettings,
    countdown: CountdownState,
    display: DisplayMode,
    position: Position,
    drag_origin: Position,
    viewport: Viewport,
    classifier: GestureClassifier,
    permission: NotificationPermission,
    permission_in_flight: bool,
    started_once: bool,
    finished: bool,
    celebration_active: bool,
    visible: bool,
    auto_reset: Option<TimerToken>,
    auto_minimize: Option<TimerToken>,
    last_token: TimerToken,
}

impl RestTimer {
    /// Mount a widget with the host's current notification permission
    pub fn new(settings: TimerSettings, permission: NotificationPermission) -> Self {
        let settings = settings.normalized();
        let viewport = settings.viewport;
        let position = viewport.default_dock(settings.widget_size_px, settings.dock_margin_px);
        Self {
            countdown: CountdownState::new(settings.total_seconds),
            display: DisplayMode::Expanded,
            position,
            drag_origin: position,
            viewport,
            classifier: GestureClassifier::new(settings.drag_threshold_px),
            permission,
            permission_in_flight: false,
            started_once: false,
            finished: false,
            celebration_active: false,
            visible: true,
            auto_reset: None,
            auto_minimize: None,
            last_token: 0,
            settings,
        }
    }

    pub fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn permission(&self) -> NotificationPermission {
        self.permission
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_dragging(&self) -> bool {
        self.classifier.is_dragging()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn auto_reset_pending(&self) -> bool {
        self.auto_reset.is_some()
    }

    pub fn auto_minimize_pending(&self) -> bool {
        self.auto_minimize.is_some()
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            remaining_seconds: self.countdown.remaining_seconds,
            total_seconds: self.countdown.total_seconds,
            running: self.countdown.running,
            finished: self.finished,
            celebration_active: self.celebration_active,
            display_mode: self.display,
            position: self.position,
            dragging: self.is_dragging(),
            visible: self.visible,
            permission: self.permission,
            display: self.countdown.display(),
            progress: self.countdown.progress(),
            color: self.countdown.color(),
        }
    }

    /// Apply one event and return the effects it requires
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::Toggle => {
                if self.countdown.running {
                    self.pause(&mut effects);
                } else {
                    self.start(&mut effects);
                }
            }
            Event::Reset => self.reset(&mut effects),
            Event::Increment => {
                let total = self
                    .countdown
                    .total_seconds
                    .saturating_add(self.settings.step_seconds)
                    .min(self.settings.max_seconds);
                self.adjust_total(total, &mut effects);
            }
            Event::Decrement => {
                let total = self
                    .countdown
                    .total_seconds
                    .saturating_sub(self.settings.step_seconds)
                    .max(self.settings.floor_seconds);
                self.adjust_total(total, &mut effects);
            }
            Event::Minimize => self.minimize(&mut effects),
            Event::Expand => self.expand(&mut effects),
            Event::OutsideInteraction => {
                if self.display == DisplayMode::Expanded
                    && !self.is_dragging()
                    && self.auto_minimize.is_none()
                {
                    let token = self.next_token();
                    self.auto_minimize = Some(token);
                    effects.push(Effect::ScheduleAutoMinimize {
                        token,
                        delay: self.settings.minimize_grace,
                    });
                }
            }
            Event::AutoMinimizeElapsed(token) => {
                if self.auto_minimize != Some(token) {
                    debug!(token, "Ignoring stale auto-minimize");
                } else {
                    self.auto_minimize = None;
                    if self.display == DisplayMode::Expanded && !self.is_dragging() {
                        debug!("Outside interaction grace elapsed, minimizing");
                        self.display = DisplayMode::Minimized;
                    }
                }
            }
            Event::Pointer(pointer) => self.pointer(pointer, &mut effects),
            Event::ViewportResized(viewport) => {
                self.viewport = viewport;
                self.position = self.clamp(self.position);
                self.drag_origin = self.clamp(self.drag_origin);
            }
            Event::SetVisible(visible) => {
                if !visible {
                    self.classifier.reset();
                }
                self.visible = visible;
            }
            Event::Close => {
                info!("Rest timer dismissed by user");
                self.visible = false;
                self.classifier.reset();
                effects.push(Effect::InvokeClose);
            }
            Event::RequestPermission => self.request_permission(&mut effects),
            Event::PermissionResolved(permission) => {
                self.permission_in_flight = false;
                if self.permission == NotificationPermission::Denied {
                    debug!(%permission, "Keeping denied notification permission");
                } else {
                    info!(%permission, "Notification permission resolved");
                    self.permission = permission;
                }
            }
            Event::Tick => {
                if !self.countdown.running {
                    debug!("Tick while stopped ignored");
                } else if self.countdown.tick() {
                    self.finish(&mut effects);
                }
            }
            Event::AutoResetElapsed(token) => {
                if self.auto_reset != Some(token) {
                    debug!(token, "Ignoring stale auto-reset");
                } else {
                    info!("Auto-reset after rest finished");
                    self.auto_reset = None;
                    self.countdown.reset();
                    self.clear_phase_flags();
                }
            }
        }
        effects
    }

    /// Stop everything owned by the widget before it goes away
    pub fn teardown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.countdown.running {
            self.countdown.running = false;
            effects.push(Effect::StopTicker);
        }
        self.cancel_auto_reset(&mut effects);
        self.cancel_auto_minimize(&mut effects);
        self.classifier.reset();
        effects
    }

    fn start(&mut self, effects: &mut Vec<Effect>) {
        if self.finished || self.countdown.is_exhausted() {
            debug!("Manual restart after finish");
            self.cancel_auto_reset(effects);
            self.countdown.reset();
            self.clear_phase_flags();
        }

        info!(remaining = self.countdown.remaining_seconds, "Rest countdown started");
        self.countdown.running = true;
        effects.push(Effect::StartTicker);

        if self.display == DisplayMode::Expanded {
            self.minimize(effects);
        }

        if !self.started_once && self.permission == NotificationPermission::NotAsked {
            self.request_permission(effects);
        }
        self.started_once = true;
    }

    fn pause(&mut self, effects: &mut Vec<Effect>) {
        info!(remaining = self.countdown.remaining_seconds, "Rest countdown paused");
        self.countdown.running = false;
        effects.push(Effect::StopTicker);
    }

    fn reset(&mut self, effects: &mut Vec<Effect>) {
        info!(total = self.countdown.total_seconds, "Rest countdown reset");
        if self.countdown.running {
            effects.push(Effect::StopTicker);
        }
        self.cancel_auto_reset(effects);
        self.countdown.reset();
        self.clear_phase_flags();
    }

    fn finish(&mut self, effects: &mut Vec<Effect>) {
        info!("Rest countdown finished");
        self.countdown.running = false;
        self.finished = true;
        self.celebration_active = true;
        effects.push(Effect::StopTicker);
        effects.push(Effect::PlayCue);

        if self.permission == NotificationPermission::Granted {
            effects.push(Effect::Notify(Notice::rest_finished(
                self.countdown.total_seconds,
            )));
        } else {
            debug!(permission = %self.permission, "Skipping completion notification");
        }

        // a previous auto-reset can only be pending if finish were re-entered
        self.cancel_auto_reset(effects);
        let token = self.next_token();
        self.auto_reset = Some(token);
        effects.push(Effect::ScheduleAutoReset {
            token,
            delay: self.settings.auto_reset_delay,
        });
    }

    fn adjust_total(&mut self, total: u64, effects: &mut Vec<Effect>) {
        if total == self.countdown.total_seconds {
            debug!(total, "Duration already at limit");
            return;
        }
        debug!(from = self.countdown.total_seconds, to = total, "Adjusting rest duration");
        self.countdown.set_total(total);
        if !self.countdown.running && self.finished {
            self.cancel_auto_reset(effects);
            self.clear_phase_flags();
        }
    }

    fn minimize(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_auto_minimize(effects);
        if self.display != DisplayMode::Minimized {
            debug!("Minimizing rest timer");
            self.display = DisplayMode::Minimized;
            self.classifier.reset();
        }
    }

    fn expand(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_auto_minimize(effects);
        if self.display != DisplayMode::Expanded {
            debug!("Expanding rest timer");
            self.display = DisplayMode::Expanded;
            self.classifier.reset();
        }
    }

    fn pointer(&mut self, pointer: PointerEvent, effects: &mut Vec<Effect>) {
        if self.display != DisplayMode::Minimized {
            return;
        }
        match self.classifier.classify(pointer) {
            Some(Gesture::Tap) => self.expand(effects),
            Some(Gesture::DragStart { dx, dy }) => {
                debug!("Drag started");
                self.cancel_auto_minimize(effects);
                self.drag_origin = self.position;
                self.position = self.clamp(self.drag_origin.offset(dx, dy));
            }
            Some(Gesture::DragMove { dx, dy }) => {
                self.position = self.clamp(self.drag_origin.offset(dx, dy));
            }
            Some(Gesture::DragEnd { dx, dy }) => {
                self.position = self.clamp(self.drag_origin.offset(dx, dy));
                debug!(x = self.position.x, y = self.position.y, "Drag ended");
                effects.push(Effect::PositionCommitted(self.position));
            }
            None => {}
        }
    }

    fn request_permission(&mut self, effects: &mut Vec<Effect>) {
        if self.permission.is_settled() || self.permission_in_flight {
            return;
        }
        self.permission_in_flight = true;
        effects.push(Effect::RequestPermission);
    }

    fn cancel_auto_reset(&mut self, effects: &mut Vec<Effect>) {
        if self.auto_reset.take().is_some() {
            effects.push(Effect::CancelAutoReset);
        }
    }

    fn cancel_auto_minimize(&mut self, effects: &mut Vec<Effect>) {
        if self.auto_minimize.take().is_some() {
            effects.push(Effect::CancelAutoMinimize);
        }
    }

    fn clear_phase_flags(&mut self) {
        self.finished = false;
        self.celebration_active = false;
    }

    fn clamp(&self, position: Position) -> Position {
        self.viewport.clamp(position, self.settings.widget_size_px)
    }

    fn next_token(&mut self) -> TimerToken {
        self.last_token += 1;
        self.last_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> RestTimer {
        RestTimer::new(TimerSettings::default(), NotificationPermission::Granted)
    }

    fn timer_with_total(total_seconds: u64) -> RestTimer {
        RestTimer::new(
            TimerSettings {
                total_seconds,
                ..TimerSettings::default()
            },
            NotificationPermission::Granted,
        )
    }

    fn run_ticks(timer: &mut RestTimer, ticks: u64) -> Vec<Effect> {
        let mut effects = Vec::new();
        for _ in 0..ticks {
            effects.extend(timer.handle(Event::Tick));
        }
        effects
    }

    fn auto_reset_token(effects: &[Effect]) -> TimerToken {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::ScheduleAutoReset { token, .. } => Some(*token),
                _ => None,
            })
            .expect("auto-reset scheduled")
    }

    fn count(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> usize {
        effects.iter().filter(|effect| pred(effect)).count()
    }

    #[test]
    fn mounts_idle_and_expanded() {
        let timer = timer();
        assert_eq!(timer.countdown().remaining_seconds, 60);
        assert_eq!(timer.countdown().total_seconds, 60);
        assert!(!timer.countdown().running);
        assert_eq!(timer.display_mode(), DisplayMode::Expanded);
        assert!(!timer.is_finished());
    }

    #[test]
    fn counts_down_to_finished_exactly_once() {
        for total in [30, 60, 90, 150] {
            let mut timer = timer_with_total(total);
            timer.handle(Event::Toggle);
            let effects = run_ticks(&mut timer, total);

            assert_eq!(timer.countdown().remaining_seconds, 0);
            assert!(!timer.countdown().running);
            assert!(timer.is_finished());
            assert_eq!(count(&effects, |e| matches!(e, Effect::ScheduleAutoReset { .. })), 1);
            assert_eq!(count(&effects, |e| *e == Effect::PlayCue), 1);

            // extra ticks after finishing change nothing
            let effects = run_ticks(&mut timer, 3);
            assert!(effects.is_empty());
            assert_eq!(timer.countdown().remaining_seconds, 0);
        }
    }

    #[test]
    fn pause_and_resume_continue_from_same_second() {
        let mut timer = timer();
        timer.handle(Event::Toggle);
        run_ticks(&mut timer, 17);
        assert_eq!(timer.handle(Event::Toggle), vec![Effect::StopTicker]);
        assert_eq!(timer.countdown().remaining_seconds, 43);

        run_ticks(&mut timer, 5);
        assert_eq!(timer.countdown().remaining_seconds, 43);

        let effects = timer.handle(Event::Toggle);
        assert!(effects.contains(&Effect::StartTicker));
        assert_eq!(timer.countdown().remaining_seconds, 43);
        run_ticks(&mut timer, 1);
        assert_eq!(timer.countdown().remaining_seconds, 42);
    }

    #[test]
    fn reset_restores_total_in_every_state() {
        let mut timer = timer();
        timer.handle(Event::Reset);
        assert_eq!(timer.countdown().remaining_seconds, 60);

        timer.handle(Event::Toggle);
        run_ticks(&mut timer, 10);
        let effects = timer.handle(Event::Reset);
        assert_eq!(effects, vec![Effect::StopTicker]);
        assert_eq!(timer.countdown().remaining_seconds, 60);
        assert!(!timer.countdown().running);

        timer.handle(Event::Toggle);
        run_ticks(&mut timer, 60);
        assert!(timer.auto_reset_pending());
        let effects = timer.handle(Event::Reset);
        assert_eq!(effects, vec![Effect::CancelAutoReset]);
        assert!(!timer.auto_reset_pending());
        assert!(!timer.is_finished());
        assert_eq!(timer.countdown().remaining_seconds, 60);
    }

    #[test]
    fn adjustments_respect_floor_and_mirror_only_when_stopped() {
        let mut timer = timer();
        timer.handle(Event::Decrement);
        assert_eq!(timer.countdown().total_seconds, 30);
        assert_eq!(timer.countdown().remaining_seconds, 30);
        timer.handle(Event::Decrement);
        assert_eq!(timer.countdown().total_seconds, 30);

        timer.handle(Event::Increment);
        timer.handle(Event::Increment);
        assert_eq!(timer.countdown().total_seconds, 90);
        assert_eq!(timer.countdown().remaining_seconds, 90);

        timer.handle(Event::Toggle);
        run_ticks(&mut timer, 5);
        timer.handle(Event::Increment);
        assert_eq!(timer.countdown().total_seconds, 120);
        assert_eq!(timer.countdown().remaining_seconds, 85);

        timer.handle(Event::Decrement);
        timer.handle(Event::Decrement);
        timer.handle(Event::Decrement);
        assert_eq!(timer.countdown().total_seconds, 30);
        assert_eq!(timer.countdown().remaining_seconds, 30);
    }

    #[test]
    fn increment_saturates_at_max() {
        let mut timer = RestTimer::new(
            TimerSettings {
                total_seconds: 5970,
                ..TimerSettings::default()
            },
            NotificationPermission::Granted,
        );
        timer.handle(Event::Increment);
        assert_eq!(timer.countdown().total_seconds, 5999);
        assert!(timer.handle(Event::Increment).is_empty());
    }

    #[test]
    fn manual_restart_cancels_pending_auto_reset() {
        let mut timer = timer();
        timer.handle(Event::Toggle);
        let effects = run_ticks(&mut timer, 60);
        let token = auto_reset_token(&effects);

        let effects = timer.handle(Event::Toggle);
        assert!(effects.contains(&Effect::CancelAutoReset));
        assert!(effects.contains(&Effect::StartTicker));
        assert!(!timer.is_finished());
        assert_eq!(timer.countdown().remaining_seconds, 60);

        run_ticks(&mut timer, 2);
        assert!(timer.handle(Event::AutoResetElapsed(token)).is_empty());
        assert_eq!(timer.countdown().remaining_seconds, 58);
        assert!(timer.countdown().running);
    }

    #[test]
    fn auto_reset_restores_full_duration() {
        let mut timer = timer();
        timer.handle(Event::Toggle);
        let effects = run_ticks(&mut timer, 60);
        let token = auto_reset_token(&effects);
        assert_eq!(
            count(&effects, |e| matches!(e, Effect::Notify(_))),
            1,
            "one notification when granted"
        );

        timer.handle(Event::AutoResetElapsed(token));
        assert_eq!(timer.countdown().remaining_seconds, 60);
        assert!(!timer.is_finished());
        assert!(!timer.snapshot().celebration_active);
        assert!(!timer.countdown().running);
    }

    #[test]
    fn finishing_without_permission_skips_notification() {
        let mut timer = RestTimer::new(TimerSettings::default(), NotificationPermission::Denied);
        timer.handle(Event::Toggle);
        let effects = run_ticks(&mut timer, 60);
        assert_eq!(count(&effects, |e| matches!(e, Effect::Notify(_))), 0);
        assert_eq!(count(&effects, |e| *e == Effect::PlayCue), 1);
    }

    #[test]
    fn start_minimizes_once() {
        let mut timer = timer();
        timer.handle(Event::Toggle);
        assert_eq!(timer.display_mode(), DisplayMode::Minimized);

        timer.handle(Event::Toggle);
        timer.handle(Event::Expand);
        timer.handle(Event::Toggle);
        assert_eq!(timer.display_mode(), DisplayMode::Minimized);

        timer.handle(Event::Toggle);
        let effects = timer.handle(Event::Toggle);
        assert_eq!(effects, vec![Effect::StartTicker]);
        assert_eq!(timer.display_mode(), DisplayMode::Minimized);
    }

    #[test]
    fn first_start_requests_permission_once() {
        let mut timer = RestTimer::new(TimerSettings::default(), NotificationPermission::NotAsked);
        let effects = timer.handle(Event::Toggle);
        assert!(effects.contains(&Effect::RequestPermission));

        timer.handle(Event::Toggle);
        let effects = timer.handle(Event::Toggle);
        assert!(!effects.contains(&Effect::RequestPermission));

        assert!(timer.handle(Event::RequestPermission).is_empty(), "in flight");
        timer.handle(Event::PermissionResolved(NotificationPermission::Granted));
        assert_eq!(timer.permission(), NotificationPermission::Granted);
        assert!(timer.handle(Event::RequestPermission).is_empty());
    }

    #[test]
    fn first_start_asks_again_after_dismissed_prompt() {
        let mut timer = RestTimer::new(TimerSettings::default(), NotificationPermission::NotAsked);
        assert_eq!(
            timer.handle(Event::RequestPermission),
            vec![Effect::RequestPermission]
        );
        timer.handle(Event::PermissionResolved(NotificationPermission::NotAsked));
        assert_eq!(timer.permission(), NotificationPermission::NotAsked);

        let effects = timer.handle(Event::Toggle);
        assert!(effects.contains(&Effect::RequestPermission));
    }

    #[test]
    fn explicit_request_is_noop_once_settled() {
        let mut timer = RestTimer::new(TimerSettings::default(), NotificationPermission::Denied);
        assert!(timer.handle(Event::RequestPermission).is_empty());

        let mut timer = RestTimer::new(TimerSettings::default(), NotificationPermission::NotAsked);
        assert_eq!(
            timer.handle(Event::RequestPermission),
            vec![Effect::RequestPermission]
        );
        timer.handle(Event::PermissionResolved(NotificationPermission::Denied));
        timer.handle(Event::PermissionResolved(NotificationPermission::Granted));
        assert_eq!(timer.permission(), NotificationPermission::Denied);
    }

    #[test]
    fn scenario_adjust_start_pause_reset() {
        let mut timer = timer_with_total(90);
        timer.handle(Event::Increment);
        timer.handle(Event::Increment);
        assert_eq!(timer.countdown().total_seconds, 150);
        assert_eq!(timer.countdown().remaining_seconds, 150);

        timer.handle(Event::Toggle);
        run_ticks(&mut timer, 10);
        timer.handle(Event::Toggle);
        assert_eq!(timer.countdown().remaining_seconds, 140);

        timer.handle(Event::Reset);
        assert_eq!(timer.countdown().remaining_seconds, 150);
        assert!(!timer.countdown().running);
    }

    #[test]
    fn outside_interaction_minimizes_after_grace() {
        let mut timer = timer();
        let effects = timer.handle(Event::OutsideInteraction);
        let token = match effects.as_slice() {
            [Effect::ScheduleAutoMinimize { token, delay }] => {
                assert_eq!(*delay, Duration::from_millis(50));
                *token
            }
            other => panic!("unexpected effects {other:?}"),
        };
        assert!(timer.handle(Event::OutsideInteraction).is_empty());
        assert_eq!(timer.display_mode(), DisplayMode::Expanded);

        timer.handle(Event::AutoMinimizeElapsed(token));
        assert_eq!(timer.display_mode(), DisplayMode::Minimized);
        assert!(timer.handle(Event::OutsideInteraction).is_empty());
    }

    #[test]
    fn expand_cancels_pending_auto_minimize() {
        let mut timer = timer();
        timer.handle(Event::Minimize);
        timer.handle(Event::Expand);
        let effects = timer.handle(Event::OutsideInteraction);
        let token = match effects.as_slice() {
            [Effect::ScheduleAutoMinimize { token, .. }] => *token,
            other => panic!("unexpected effects {other:?}"),
        };
        assert_eq!(timer.handle(Event::Expand), vec![Effect::CancelAutoMinimize]);
        timer.handle(Event::AutoMinimizeElapsed(token));
        assert_eq!(timer.display_mode(), DisplayMode::Expanded);
    }

    #[test]
    fn drag_moves_without_expanding_and_tap_expands() {
        let mut timer = timer();
        timer.handle(Event::Minimize);
        let start = timer.position();

        timer.handle(Event::Pointer(PointerEvent::Down { x: 300.0, y: 700.0 }));
        timer.handle(Event::Pointer(PointerEvent::Move { x: 250.0, y: 650.0 }));
        assert!(timer.is_dragging());
        timer.handle(Event::Pointer(PointerEvent::Move { x: 200.0, y: 600.0 }));
        let effects = timer.handle(Event::Pointer(PointerEvent::Up { x: 200.0, y: 600.0 }));

        let expected = start.offset(-100.0, -100.0);
        assert_eq!(effects, vec![Effect::PositionCommitted(expected)]);
        assert_eq!(timer.position(), expected);
        assert_eq!(timer.display_mode(), DisplayMode::Minimized);
        assert!(!timer.is_dragging());

        timer.handle(Event::Pointer(PointerEvent::Down { x: 10.0, y: 10.0 }));
        timer.handle(Event::Pointer(PointerEvent::Up { x: 11.0, y: 10.0 }));
        assert_eq!(timer.display_mode(), DisplayMode::Expanded);
        assert_eq!(timer.position(), expected);
    }

    #[test]
    fn drag_start_follows_the_pointer() {
        let mut timer = timer();
        timer.handle(Event::Minimize);
        let start = timer.position();

        timer.handle(Event::Pointer(PointerEvent::Down { x: 300.0, y: 700.0 }));
        timer.handle(Event::Pointer(PointerEvent::Move { x: 290.0, y: 700.0 }));
        assert!(timer.is_dragging());
        assert_eq!(timer.position(), start.offset(-10.0, 0.0));
    }

    #[test]
    fn drag_is_clamped_to_viewport() {
        let mut timer = timer();
        timer.handle(Event::Minimize);
        timer.handle(Event::Pointer(PointerEvent::Down { x: 100.0, y: 100.0 }));
        timer.handle(Event::Pointer(PointerEvent::Move { x: -5000.0, y: 9000.0 }));
        timer.handle(Event::Pointer(PointerEvent::Up { x: -5000.0, y: 9000.0 }));
        assert_eq!(timer.position(), Position::new(0.0, 844.0 - 72.0));

        timer.handle(Event::ViewportResized(Viewport::new(200.0, 300.0)));
        assert_eq!(timer.position(), Position::new(0.0, 300.0 - 72.0));
    }

    #[test]
    fn pointer_ignored_while_expanded() {
        let mut timer = timer();
        let before = timer.position();
        timer.handle(Event::Pointer(PointerEvent::Down { x: 0.0, y: 0.0 }));
        timer.handle(Event::Pointer(PointerEvent::Move { x: 50.0, y: 50.0 }));
        assert!(!timer.is_dragging());
        assert_eq!(timer.position(), before);
    }

    #[test]
    fn close_hides_and_invokes_callback() {
        let mut timer = timer();
        timer.handle(Event::Toggle);
        assert_eq!(timer.handle(Event::Close), vec![Effect::InvokeClose]);
        assert!(!timer.is_visible());
        assert!(timer.countdown().running);

        timer.handle(Event::SetVisible(true));
        assert!(timer.is_visible());
    }

    #[test]
    fn teardown_cancels_owned_timers() {
        let mut timer = timer();
        timer.handle(Event::Toggle);
        run_ticks(&mut timer, 60);
        timer.handle(Event::Expand);
        timer.handle(Event::OutsideInteraction);

        let effects = timer.teardown();
        assert_eq!(
            effects,
            vec![Effect::CancelAutoReset, Effect::CancelAutoMinimize]
        );
        assert!(!timer.auto_reset_pending());
        assert!(!timer.auto_minimize_pending());
    }
}
