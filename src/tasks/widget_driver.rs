//! Rest timer driver task
//!
//! One task owns the [`RestTimer`] and every timer resource it needs: the
//! one-second ticker, the auto-reset one-shot and the auto-minimize one-shot.
//! User events, timer expiries and the results of fire-and-forget host calls
//! are all funnelled through the same `select!` loop, so they are observed in
//! a single order and a cancelled timer can never fire afterwards.

use std::{fmt, pin::Pin, sync::Arc};

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::{JoinHandle, JoinSet},
    time::{interval_at, sleep, Instant, Interval, MissedTickBehavior, Sleep},
};
use tracing::{debug, info, warn};

use crate::{
    error::WidgetError,
    services::{AudioCue, NotificationHost},
    state::{
        settings::TICK_PERIOD, Effect, Event, RestTimer, TimerSettings, TimerToken,
        WidgetSnapshot,
    },
};

/// Callback run when the user dismisses the widget
pub type CloseCallback = Box<dyn Fn() + Send + Sync>;

/// Capabilities handed to a widget when it is mounted
pub struct WidgetHost {
    pub notifications: Arc<dyn NotificationHost>,
    pub audio: Arc<dyn AudioCue>,
    pub on_close: Option<CloseCallback>,
}

impl WidgetHost {
    pub fn new(notifications: Arc<dyn NotificationHost>, audio: Arc<dyn AudioCue>) -> Self {
        Self {
            notifications,
            audio,
            on_close: None,
        }
    }

    pub fn with_close_callback(mut self, on_close: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }
}

impl fmt::Debug for WidgetHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetHost")
            .field("on_close", &self.on_close.is_some())
            .finish_non_exhaustive()
    }
}

enum Command {
    Event {
        event: Event,
        reply: Option<oneshot::Sender<WidgetSnapshot>>,
    },
    Unmount {
        reply: oneshot::Sender<WidgetSnapshot>,
    },
}

/// Cheap cloneable handle used by the embedding page to drive a mounted widget
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<WidgetSnapshot>,
}

impl WidgetHandle {
    /// Send an event and wait for the snapshot taken right after it was applied
    pub async fn dispatch(&self, event: Event) -> Result<WidgetSnapshot, WidgetError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Event {
                event,
                reply: Some(reply),
            })
            .map_err(|_| WidgetError::Stopped)?;
        rx.await.map_err(|_| WidgetError::Stopped)
    }

    /// Queue an event without waiting for it to be applied
    pub fn send(&self, event: Event) -> Result<(), WidgetError> {
        self.commands
            .send(Command::Event { event, reply: None })
            .map_err(|_| WidgetError::Stopped)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> WidgetSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<WidgetSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.commands.is_closed()
    }

    /// Cancel every timer and stop the driver. Returns the final snapshot.
    pub async fn unmount(&self) -> Result<WidgetSnapshot, WidgetError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Unmount { reply })
            .map_err(|_| WidgetError::Stopped)?;
        rx.await.map_err(|_| WidgetError::Stopped)
    }
}

/// Mount a rest timer on the current tokio runtime
pub fn mount(settings: TimerSettings, host: WidgetHost) -> (WidgetHandle, JoinHandle<()>) {
    let permission = host.notifications.current_permission();
    info!(
        total = settings.total_seconds,
        %permission,
        "Mounting rest timer"
    );
    let timer = RestTimer::new(settings, permission);

    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (internal_tx, internal_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());

    let driver = WidgetDriver {
        timer,
        host,
        internal_tx,
        snapshot_tx,
        ticker: None,
        auto_reset: None,
        auto_minimize: None,
        background: JoinSet::new(),
    };
    let join = tokio::spawn(driver.run(commands_rx, internal_rx));

    (
        WidgetHandle {
            commands: commands_tx,
            snapshots: snapshot_rx,
        },
        join,
    )
}

struct OneShot {
    token: TimerToken,
    sleep: Pin<Box<Sleep>>,
}

impl OneShot {
    fn new(token: TimerToken, delay: std::time::Duration) -> Self {
        Self {
            token,
            sleep: Box::pin(sleep(delay)),
        }
    }
}

struct WidgetDriver {
    timer: RestTimer,
    host: WidgetHost,
    internal_tx: mpsc::UnboundedSender<Event>,
    snapshot_tx: watch::Sender<WidgetSnapshot>,
    ticker: Option<Interval>,
    auto_reset: Option<OneShot>,
    auto_minimize: Option<OneShot>,
    background: JoinSet<()>,
}

impl WidgetDriver {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut internal: mpsc::UnboundedReceiver<Event>,
    ) {
        debug!("Rest timer driver started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Event { event, reply }) => {
                        self.apply(event);
                        if let Some(reply) = reply {
                            // the caller may have stopped waiting
                            let _ = reply.send(self.timer.snapshot());
                        }
                    }
                    Some(Command::Unmount { reply }) => {
                        self.teardown();
                        let _ = reply.send(self.timer.snapshot());
                        break;
                    }
                    None => {
                        debug!("All widget handles dropped");
                        self.teardown();
                        break;
                    }
                },

                Some(event) = internal.recv() => self.apply(event),

                _ = next_tick(&mut self.ticker) => self.apply(Event::Tick),

                token = next_expiry(&mut self.auto_reset) => {
                    self.auto_reset = None;
                    self.apply(Event::AutoResetElapsed(token));
                }

                token = next_expiry(&mut self.auto_minimize) => {
                    self.auto_minimize = None;
                    self.apply(Event::AutoMinimizeElapsed(token));
                }

                Some(result) = self.background.join_next(), if !self.background.is_empty() => {
                    if let Err(e) = result {
                        if !e.is_cancelled() {
                            warn!("Host call task failed: {}", e);
                        }
                    }
                }
            }
        }

        info!("Rest timer unmounted");
    }

    fn apply(&mut self, event: Event) {
        debug!(?event, "Rest timer event");
        let effects = self.timer.handle(event);
        for effect in effects {
            self.perform(effect);
        }
        self.snapshot_tx.send_replace(self.timer.snapshot());
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::StartTicker => {
                let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
            }
            Effect::StopTicker => self.ticker = None,
            Effect::ScheduleAutoReset { token, delay } => {
                debug!(token, ?delay, "Scheduling auto-reset");
                self.auto_reset = Some(OneShot::new(token, delay));
            }
            Effect::CancelAutoReset => {
                debug!("Cancelling auto-reset");
                self.auto_reset = None;
            }
            Effect::ScheduleAutoMinimize { token, delay } => {
                self.auto_minimize = Some(OneShot::new(token, delay));
            }
            Effect::CancelAutoMinimize => self.auto_minimize = None,
            Effect::PlayCue => {
                let audio = Arc::clone(&self.host.audio);
                self.background.spawn(async move {
                    if let Err(e) = audio.play().await {
                        warn!("Completion cue failed: {}", e);
                    }
                });
            }
            Effect::Notify(notice) => {
                let notifications = Arc::clone(&self.host.notifications);
                self.background.spawn(async move {
                    if let Err(e) = notifications.notify(&notice).await {
                        warn!("Completion notification failed: {}", e);
                    }
                });
            }
            Effect::RequestPermission => {
                let notifications = Arc::clone(&self.host.notifications);
                let results = self.internal_tx.clone();
                self.background.spawn(async move {
                    let permission = notifications.request().await;
                    if results.send(Event::PermissionResolved(permission)).is_err() {
                        debug!("Widget gone before permission request resolved");
                    }
                });
            }
            Effect::PositionCommitted(position) => {
                debug!(x = position.x, y = position.y, "Widget position committed");
            }
            Effect::InvokeClose => {
                if let Some(on_close) = &self.host.on_close {
                    on_close();
                }
            }
        }
    }

    fn teardown(&mut self) {
        for effect in self.timer.teardown() {
            self.perform(effect);
        }
        self.ticker = None;
        self.auto_reset = None;
        self.auto_minimize = None;
        self.background.abort_all();
        self.snapshot_tx.send_replace(self.timer.snapshot());
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn next_expiry(slot: &mut Option<OneShot>) -> TimerToken {
    match slot {
        Some(one_shot) => {
            one_shot.sleep.as_mut().await;
            one_shot.token
        }
        None => std::future::pending().await,
    }
}
