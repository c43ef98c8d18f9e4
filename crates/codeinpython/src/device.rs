//! Boundary to device add-ons.
//!
//! Device panels ship separately from the editor. Instead of importing them
//! by name at runtime, add-ons register their panels in a [`DeviceRegistry`]
//! under a module name; a lookup for a module that is not there yields
//! [`DeviceLoad::NotAvailable`] with a reason the caller can show.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

pub type PanelError = Box<dyn std::error::Error + Send + Sync>;

/// The student-facing device window.
pub trait DeviceUserPanel {
    fn open(&self, language: &str) -> Result<(), PanelError>;
}

/// The service window, used for firmware maintenance.
pub trait DeviceServicePanel {
    fn open(&self, language: &str, firmware_dir: &Path) -> Result<(), PanelError>;
}

/// Panels provided by one device module.
#[derive(Default)]
pub struct DeviceModule {
    user_panel: Option<Box<dyn DeviceUserPanel>>,
    service_panel: Option<Box<dyn DeviceServicePanel>>,
}

impl DeviceModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_panel<P: DeviceUserPanel + 'static>(mut self, panel: P) -> Self {
        self.user_panel = Some(Box::new(panel));
        self
    }

    pub fn service_panel<P: DeviceServicePanel + 'static>(mut self, panel: P) -> Self {
        self.service_panel = Some(Box::new(panel));
        self
    }
}

/// Outcome of a panel lookup.
pub enum DeviceLoad<'a, P: ?Sized> {
    Loaded(&'a P),
    NotAvailable { module: String, reason: String },
}

impl<P: ?Sized> DeviceLoad<'_, P> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl<P: ?Sized> fmt::Debug for DeviceLoad<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("Loaded(..)"),
            Self::NotAvailable { module, reason } => f
                .debug_struct("NotAvailable")
                .field("module", module)
                .field("reason", reason)
                .finish(),
        }
    }
}

impl<P: ?Sized> fmt::Display for DeviceLoad<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("device panel loaded"),
            Self::NotAvailable { module, reason } => write!(
                f,
                "Loading CodeInPython library failed\n  {module}: \"{reason}\"\nHave you loaded add-ons from CodeInPython?"
            ),
        }
    }
}

#[derive(Default)]
pub struct DeviceRegistry {
    modules: BTreeMap<String, DeviceModule>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under `name`, replacing an earlier registration.
    pub fn register(&mut self, name: impl Into<String>, module: DeviceModule) {
        let name = name.into();
        tracing::debug!(module = %name, "device module registered");
        self.modules.insert(name, module);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn load_user_panel(&self, name: &str) -> DeviceLoad<'_, dyn DeviceUserPanel> {
        match self.modules.get(name) {
            Some(DeviceModule {
                user_panel: Some(panel),
                ..
            }) => DeviceLoad::Loaded(&**panel),
            Some(_) => not_available(name, "module has no user panel"),
            None => not_available(name, "no device module with this name is installed"),
        }
    }

    pub fn load_service_panel(&self, name: &str) -> DeviceLoad<'_, dyn DeviceServicePanel> {
        match self.modules.get(name) {
            Some(DeviceModule {
                service_panel: Some(panel),
                ..
            }) => DeviceLoad::Loaded(&**panel),
            Some(_) => not_available(name, "module has no service panel"),
            None => not_available(name, "no device module with this name is installed"),
        }
    }
}

fn not_available<'a, P: ?Sized>(module: &str, reason: &str) -> DeviceLoad<'a, P> {
    tracing::warn!(module, reason, "device module not available");
    DeviceLoad::NotAvailable {
        module: module.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl DeviceUserPanel for Recorder {
        fn open(&self, language: &str) -> Result<(), PanelError> {
            self.0.borrow_mut().push(format!("user:{language}"));
            Ok(())
        }
    }

    impl DeviceServicePanel for Recorder {
        fn open(&self, language: &str, firmware_dir: &Path) -> Result<(), PanelError> {
            self.0
                .borrow_mut()
                .push(format!("service:{language}:{}", firmware_dir.display()));
            Ok(())
        }
    }

    #[test]
    fn unknown_module_is_not_available() {
        let registry = DeviceRegistry::new();
        match registry.load_user_panel("devices") {
            DeviceLoad::NotAvailable { module, .. } => assert_eq!(module, "devices"),
            DeviceLoad::Loaded(_) => panic!("nothing was registered"),
        }
        let message = registry.load_service_panel("devices").to_string();
        assert!(message.starts_with("Loading CodeInPython library failed"));
        assert!(message.ends_with("Have you loaded add-ons from CodeInPython?"));
    }

    #[test]
    fn registered_panels_open() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = DeviceRegistry::new();
        registry.register(
            "devices",
            DeviceModule::new()
                .user_panel(Recorder(Rc::clone(&seen)))
                .service_panel(Recorder(Rc::clone(&seen))),
        );

        let DeviceLoad::Loaded(user) = registry.load_user_panel("devices") else {
            panic!("user panel should load");
        };
        user.open("pl").unwrap();
        let DeviceLoad::Loaded(service) = registry.load_service_panel("devices") else {
            panic!("service panel should load");
        };
        service.open("en", Path::new("fw")).unwrap();

        assert_eq!(*seen.borrow(), vec!["user:pl", "service:en:fw"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["devices"]);
    }

    #[test]
    fn module_without_the_panel() {
        let mut registry = DeviceRegistry::new();
        registry.register("sensors", DeviceModule::new());
        assert!(registry.contains("sensors"));
        assert!(!registry.load_user_panel("sensors").is_loaded());
    }
}
