//! Validated Android messaging configuration and UTC time normalization.
//!
//! [`domain::android::AndroidConfig`] is an immutable builder for the
//! Android block of a cloud message. [`engine::temporal::to_utc_instant`]
//! turns loosely typed time values into a [`engine::temporal::UtcInstant`].

pub mod cmd {
    pub mod android;
    pub mod instant;
}

pub mod domain {
    pub mod android;
    pub mod error;
    pub mod report;
    pub mod ttl;
}

pub mod engine {
    pub mod android;
    pub mod temporal;
}

pub mod io;

pub mod util {
    pub mod sort;
    pub mod time;
}
