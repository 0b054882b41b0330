mod fields;

use serde_json::Value;

use crate::domain::android::{
    AndroidConfig, AndroidFcmOptions, AndroidNotification, MessagePriority,
    NotificationPriority, Visibility,
};
use crate::domain::error::InvalidArgument;
use crate::domain::ttl::Ttl;
use fields::ObjectReader;

const CONFIG_FIELDS: &[&str] = &[
    "collapse_key",
    "priority",
    "ttl",
    "restricted_package_name",
    "data",
    "notification",
    "fcm_options",
    "direct_boot_ok",
];

const NOTIFICATION_FIELDS: &[&str] = &[
    "title",
    "body",
    "icon",
    "color",
    "sound",
    "tag",
    "click_action",
    "body_loc_key",
    "body_loc_args",
    "title_loc_key",
    "title_loc_args",
    "channel_id",
    "image",
    "ticker",
    "sticky",
    "event_time",
    "local_only",
    "notification_priority",
    "default_sound",
    "default_vibrate_timings",
    "default_light_settings",
    "visibility",
    "notification_count",
];

const FCM_OPTIONS_FIELDS: &[&str] = &["analytics_label"];

/// Build an [`AndroidConfig`] from its untyped wire mapping, failing on the
/// first invalid field.
pub fn parse_config(value: &Value) -> Result<AndroidConfig, InvalidArgument> {
    let root = ObjectReader::new("$", value, CONFIG_FIELDS)?;

    let config = AndroidConfig {
        collapse_key: root.string("collapse_key")?,
        priority: root.enumeration::<MessagePriority>("priority")?,
        ttl: Ttl::parse(root.raw("ttl"))?,
        restricted_package_name: root.string("restricted_package_name")?,
        data: root.string_map("data")?,
        notification: root
            .object("notification", NOTIFICATION_FIELDS)?
            .map(|reader| parse_notification(&reader))
            .transpose()?,
        fcm_options: root
            .object("fcm_options", FCM_OPTIONS_FIELDS)?
            .map(|reader| {
                Ok::<_, InvalidArgument>(AndroidFcmOptions {
                    analytics_label: reader.string("analytics_label")?,
                })
            })
            .transpose()?,
        direct_boot_ok: root.boolean("direct_boot_ok")?,
    };
    tracing::debug!(empty = config.is_empty(), "parsed android config");
    Ok(config)
}

fn parse_notification(reader: &ObjectReader<'_>) -> Result<AndroidNotification, InvalidArgument> {
    Ok(AndroidNotification {
        title: reader.string("title")?,
        body: reader.string("body")?,
        icon: reader.string("icon")?,
        color: reader.string("color")?,
        sound: reader.string("sound")?,
        tag: reader.string("tag")?,
        click_action: reader.string("click_action")?,
        body_loc_key: reader.string("body_loc_key")?,
        body_loc_args: reader.string_list("body_loc_args")?,
        title_loc_key: reader.string("title_loc_key")?,
        title_loc_args: reader.string_list("title_loc_args")?,
        channel_id: reader.string("channel_id")?,
        image: reader.string("image")?,
        ticker: reader.string("ticker")?,
        sticky: reader.boolean("sticky")?,
        event_time: reader.string("event_time")?,
        local_only: reader.boolean("local_only")?,
        notification_priority: reader.enumeration::<NotificationPriority>("notification_priority")?,
        default_sound: reader.boolean("default_sound")?,
        default_vibrate_timings: reader.boolean("default_vibrate_timings")?,
        default_light_settings: reader.boolean("default_light_settings")?,
        visibility: reader.enumeration::<Visibility>("visibility")?,
        notification_count: reader.count("notification_count")?,
    })
}
