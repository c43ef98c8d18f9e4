use crate::settings::Settings;

pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// Something that refreshes itself when settings change.
pub trait SettingsSubscriber {
    /// Name of this subscriber for error reporting.
    fn name(&self) -> &str;

    fn settings_changed(&self, settings: &Settings) -> Result<(), SubscriberError>;
}

/// Explicit list of parties to notify after a settings change.
#[derive(Default)]
pub struct Subscribers {
    list: Vec<Box<dyn SettingsSubscriber>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<S: SettingsSubscriber + 'static>(&mut self, subscriber: S) {
        self.list.push(Box::new(subscriber));
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Notify everyone in subscription order. A failing subscriber is logged
    /// and does not stop the others; returns how many failed.
    pub fn notify_all(&self, settings: &Settings) -> usize {
        let mut failed = 0;
        for subscriber in &self.list {
            if let Err(err) = subscriber.settings_changed(settings) {
                tracing::error!(subscriber = subscriber.name(), %err, "settings subscriber failed");
                failed += 1;
            }
        }
        failed
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.list.iter().map(|s| s.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        seen: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl SettingsSubscriber for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn settings_changed(&self, settings: &Settings) -> Result<(), SubscriberError> {
            self.seen
                .borrow_mut()
                .push(format!("{}:{}", self.name, settings.class_name));
            if self.fail {
                return Err("panel is gone".into());
            }
            Ok(())
        }
    }

    #[test]
    fn notify_in_order_past_failures() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::new();
        for (name, fail) in [("tree", false), ("broken", true), ("title", false)] {
            subscribers.subscribe(Recorder {
                name,
                seen: Rc::clone(&seen),
                fail,
            });
        }

        let mut settings = Settings::default();
        settings.set("class_name", "3b");
        assert_eq!(subscribers.notify_all(&settings), 1);
        assert_eq!(*seen.borrow(), vec!["tree:3b", "broken:3b", "title:3b"]);
    }

    #[test]
    fn empty_list_notifies_nobody() {
        let subscribers = Subscribers::new();
        assert!(subscribers.is_empty());
        assert_eq!(subscribers.notify_all(&Settings::default()), 0);
    }
}
