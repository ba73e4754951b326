//! Notification permission as reported by the host

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPermission {
    #[default]
    NotAsked,
    Granted,
    Denied,
}

impl NotificationPermission {
    /// Once the user answered, the host decision is final
    pub fn is_settled(&self) -> bool {
        !matches!(self, NotificationPermission::NotAsked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPermission::NotAsked => "not-asked",
            NotificationPermission::Granted => "granted",
            NotificationPermission::Denied => "denied",
        }
    }
}

impl fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationPermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-asked" | "default" => Ok(NotificationPermission::NotAsked),
            "granted" => Ok(NotificationPermission::Granted),
            "denied" => Ok(NotificationPermission::Denied),
            other => Err(format!("unknown notification permission: {}", other)),
        }
    }
}
