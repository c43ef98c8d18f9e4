//! Settings for the CodeInPython workspace.
//!
//! There is no global instance: a [`SettingsStore`] is built once at startup,
//! the loaded [`Settings`] are passed to whoever needs them, and parties that
//! must refresh on change register with [`Subscribers`].

mod dir;
mod error;
mod settings;
mod store;
mod subscribers;

pub use dir::{CONFIG_ENV, settings_path, user_config};
pub use error::{Error, Result};
pub use settings::{DEFAULT_CLASS_NAME, DEFAULT_DEVICES_MODULE, DEFAULT_LANGUAGE, Settings};
pub use store::SettingsStore;
pub use subscribers::{SettingsSubscriber, SubscriberError, Subscribers};
