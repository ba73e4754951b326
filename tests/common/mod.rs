#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use rest_timer::{
    services::{AudioCue, Notice, NotificationHost},
    state::NotificationPermission,
    tasks::{mount, WidgetHandle, WidgetHost},
    HostError, TimerSettings,
};
use tokio::task::JoinHandle;

/// Notification host that records calls and answers requests with `answer`
pub struct FakeNotifications {
    permission: Mutex<NotificationPermission>,
    answer: NotificationPermission,
    fail: bool,
    requests: AtomicUsize,
    notices: Mutex<Vec<Notice>>,
}

impl FakeNotifications {
    pub fn new(permission: NotificationPermission) -> Arc<Self> {
        Self::build(permission, NotificationPermission::Granted, false)
    }

    pub fn answering(answer: NotificationPermission) -> Arc<Self> {
        Self::build(NotificationPermission::NotAsked, answer, false)
    }

    pub fn failing() -> Arc<Self> {
        Self::build(NotificationPermission::Granted, NotificationPermission::Granted, true)
    }

    fn build(permission: NotificationPermission, answer: NotificationPermission, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            permission: Mutex::new(permission),
            answer,
            fail,
            requests: AtomicUsize::new(0),
            notices: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationHost for FakeNotifications {
    fn current_permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    async fn request(&self) -> NotificationPermission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock().unwrap() = self.answer;
        self.answer
    }

    async fn notify(&self, notice: &Notice) -> Result<(), HostError> {
        self.notices.lock().unwrap().push(notice.clone());
        if self.fail {
            return Err(HostError::Unsupported);
        }
        Ok(())
    }
}

/// Audio cue that counts plays
pub struct FakeAudio {
    fail: bool,
    plays: AtomicUsize,
}

impl FakeAudio {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            plays: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            plays: AtomicUsize::new(0),
        })
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioCue for FakeAudio {
    async fn play(&self) -> Result<(), HostError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HostError::Playback("autoplay blocked".to_string()));
        }
        Ok(())
    }
}

pub struct Mounted {
    pub widget: WidgetHandle,
    pub driver: JoinHandle<()>,
    pub notifications: Arc<FakeNotifications>,
    pub audio: Arc<FakeAudio>,
}

pub fn mount_with(
    settings: TimerSettings,
    notifications: Arc<FakeNotifications>,
    audio: Arc<FakeAudio>,
) -> Mounted {
    let host = WidgetHost::new(notifications.clone(), audio.clone());
    let (widget, driver) = mount(settings, host);
    Mounted {
        widget,
        driver,
        notifications,
        audio,
    }
}

pub fn mount_default(permission: NotificationPermission) -> Mounted {
    mount_with(
        TimerSettings::default(),
        FakeNotifications::new(permission),
        FakeAudio::new(),
    )
}
