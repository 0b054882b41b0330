use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::error::InvalidArgument;
use crate::domain::ttl::Ttl;
use crate::engine::android::parse_config;
use crate::engine::temporal::{TemporalInput, to_utc_instant};

/// Sound name the provider maps to the device's default notification sound.
pub const DEFAULT_SOUND: &str = "default";

/// Enumerations carried on the wire as fixed string literals.
pub trait WireEnum: Copy + Sized + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(self) -> &'static str;

    fn from_wire(text: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == text)
    }
}

/// Delivery priority of the whole message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    Normal,
    High,
}

impl WireEnum for MessagePriority {
    const VARIANTS: &'static [Self] = &[Self::Normal, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

/// Priority of the notification as shown by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPriority {
    PriorityUnspecified,
    PriorityMin,
    PriorityLow,
    PriorityDefault,
    PriorityHigh,
    PriorityMax,
}

impl WireEnum for NotificationPriority {
    const VARIANTS: &'static [Self] = &[
        Self::PriorityUnspecified,
        Self::PriorityMin,
        Self::PriorityLow,
        Self::PriorityDefault,
        Self::PriorityHigh,
        Self::PriorityMax,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PriorityUnspecified => "PRIORITY_UNSPECIFIED",
            Self::PriorityMin => "PRIORITY_MIN",
            Self::PriorityLow => "PRIORITY_LOW",
            Self::PriorityDefault => "PRIORITY_DEFAULT",
            Self::PriorityHigh => "PRIORITY_HIGH",
            Self::PriorityMax => "PRIORITY_MAX",
        }
    }
}

/// Lock screen visibility of the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    VisibilityUnspecified,
    Private,
    Public,
    Secret,
}

impl WireEnum for Visibility {
    const VARIANTS: &'static [Self] = &[
        Self::VisibilityUnspecified,
        Self::Private,
        Self::Public,
        Self::Secret,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::VisibilityUnspecified => "VISIBILITY_UNSPECIFIED",
            Self::Private => "PRIVATE",
            Self::Public => "PUBLIC",
            Self::Secret => "SECRET",
        }
    }
}

/// Notification block of an [`AndroidConfig`]. Unset fields are omitted on
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AndroidNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) click_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body_loc_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title_loc_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) local_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notification_priority: Option<NotificationPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default_sound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default_vibrate_timings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default_light_settings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notification_count: Option<u32>,
}

impl AndroidNotification {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_icon(&self, icon: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..self.clone()
        }
    }

    /// Set the icon color, passed through as given.
    #[must_use]
    pub fn with_color(&self, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sound(&self, sound: impl Into<String>) -> Self {
        Self {
            sound: Some(sound.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_channel_id(&self, channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: Some(channel_id.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_image(&self, image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..self.clone()
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    pub fn event_time(&self) -> Option<&str> {
        self.event_time.as_deref()
    }
}

/// Options for features provided by the messaging SDK on Android.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AndroidFcmOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) analytics_label: Option<String>,
}

impl AndroidFcmOptions {
    pub fn analytics_label(&self) -> Option<&str> {
        self.analytics_label.as_deref()
    }
}

/// Android-specific block of a cloud message.
///
/// The value is immutable: every `with_*` operation returns a new config and
/// leaves the receiver untouched. Only fields that were set appear in the
/// wire mapping, so an empty config serializes to `{}`.
///
/// ```
/// use fcmprep::domain::android::AndroidConfig;
/// use serde_json::json;
///
/// let config = AndroidConfig::new()
///     .with_default_sound()
///     .with_high_message_priority();
/// assert_eq!(
///     config.to_value().unwrap(),
///     json!({"priority": "high", "notification": {"sound": "default"}})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AndroidConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) collapse_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) priority: Option<MessagePriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ttl: Option<Ttl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) restricted_package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notification: Option<AndroidNotification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) fcm_options: Option<AndroidFcmOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) direct_boot_ok: Option<bool>,
}

impl AndroidConfig {
    /// An empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from an untyped wire mapping.
    ///
    /// Fails on the first invalid or unknown field; the error names the
    /// dotted field path and the rejected value.
    pub fn from_value(value: &Value) -> Result<Self, InvalidArgument> {
        parse_config(value)
    }

    /// Canonical wire mapping holding only the fields that were set.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn with_default_sound(&self) -> Self {
        self.with_sound(DEFAULT_SOUND)
    }

    /// Set `notification.sound`, keeping the other notification fields.
    #[must_use]
    pub fn with_sound(&self, sound: impl Into<String>) -> Self {
        let notification = self.notification.clone().unwrap_or_default();
        self.with_notification(notification.with_sound(sound))
    }

    #[must_use]
    pub fn with_normal_message_priority(&self) -> Self {
        self.with_priority(MessagePriority::Normal)
    }

    #[must_use]
    pub fn with_high_message_priority(&self) -> Self {
        self.with_priority(MessagePriority::High)
    }

    #[must_use]
    pub fn with_priority(&self, priority: MessagePriority) -> Self {
        Self {
            priority: Some(priority),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_ttl(&self, ttl: impl Into<Ttl>) -> Self {
        Self {
            ttl: Some(ttl.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_collapse_key(&self, collapse_key: impl Into<String>) -> Self {
        Self {
            collapse_key: Some(collapse_key.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_restricted_package_name(&self, package: impl Into<String>) -> Self {
        Self {
            restricted_package_name: Some(package.into()),
            ..self.clone()
        }
    }

    /// Replace the whole `data` payload.
    #[must_use]
    pub fn with_data(&self, data: BTreeMap<String, String>) -> Self {
        Self {
            data: Some(data),
            ..self.clone()
        }
    }

    /// Add or overwrite one `data` entry.
    #[must_use]
    pub fn with_data_field(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = self.data.clone().unwrap_or_default();
        data.insert(key.into(), value.into());
        self.with_data(data)
    }

    #[must_use]
    pub fn with_notification(&self, notification: AndroidNotification) -> Self {
        Self {
            notification: Some(notification),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_analytics_label(&self, label: impl Into<String>) -> Self {
        Self {
            fcm_options: Some(AndroidFcmOptions {
                analytics_label: Some(label.into()),
            }),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_direct_boot_ok(&self, direct_boot_ok: bool) -> Self {
        Self {
            direct_boot_ok: Some(direct_boot_ok),
            ..self.clone()
        }
    }

    /// Set `notification.event_time` from any accepted time input, stored as
    /// RFC 3339 UTC text.
    pub fn with_event_time(&self, input: impl Into<TemporalInput>) -> Result<Self, InvalidArgument> {
        let instant = to_utc_instant(input.into()).map_err(|error| InvalidArgument {
            field: "notification.event_time".to_string(),
            ..error
        })?;
        let notification = AndroidNotification {
            event_time: Some(instant.to_rfc3339()),
            ..self.notification.clone().unwrap_or_default()
        };
        Ok(self.with_notification(notification))
    }

    pub fn collapse_key(&self) -> Option<&str> {
        self.collapse_key.as_deref()
    }

    pub fn priority(&self) -> Option<MessagePriority> {
        self.priority
    }

    pub fn ttl(&self) -> Option<Ttl> {
        self.ttl
    }

    pub fn restricted_package_name(&self) -> Option<&str> {
        self.restricted_package_name.as_deref()
    }

    pub fn data(&self) -> Option<&BTreeMap<String, String>> {
        self.data.as_ref()
    }

    pub fn notification(&self) -> Option<&AndroidNotification> {
        self.notification.as_ref()
    }

    pub fn fcm_options(&self) -> Option<&AndroidFcmOptions> {
        self.fcm_options.as_ref()
    }

    pub fn direct_boot_ok(&self) -> Option<bool> {
        self.direct_boot_ok
    }
}

impl TryFrom<&Value> for AndroidConfig {
    type Error = InvalidArgument;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
