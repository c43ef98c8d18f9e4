use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

use cip_config::{Settings, SettingsStore, SettingsSubscriber, Subscribers};
use cip_install::{ArchiveInstaller, UpdateOffer};
use cip_lesson::{ExampleNode, LessonEntry};
use cip_path::{PathResolver, Place, Session, WorkspaceRoot};

use crate::device::{DeviceLoad, DeviceRegistry, DeviceServicePanel, DeviceUserPanel};
use crate::error::{Error, Result};

/// File dropped into a Python site directory so `main` is importable.
pub const SEARCH_PATH_FILE: &str = "codeinpython_path.pth";

/// Places created by [`Mode::prepare`].
pub const PREPARED_PLACES: [Place; 8] = [
    Place::Main,
    Place::Workspace,
    Place::Libraries,
    Place::Examples,
    Place::CustomExamples,
    Place::Firmware,
    Place::ZipArchive,
    Place::MuModules,
];

static USER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_+=-]{0,20}$").expect("user name pattern is valid"));

/// One CodeInPython session: a workspace root, the persisted settings and
/// the logged-in user.
///
/// Everything that depends on the class or user goes through
/// [`Mode::resolver`], which is rebuilt whenever either changes.
pub struct Mode {
    resolver: PathResolver,
    store: SettingsStore,
    settings: Settings,
    subscribers: Subscribers,
    devices: DeviceRegistry,
}

impl Mode {
    /// Load settings from `store` and bind a logged-out session to `root`.
    pub fn new(root: WorkspaceRoot, store: SettingsStore) -> Result<Self> {
        let settings = store.load()?;
        let session = Session::new(&settings.class_name, "");
        tracing::debug!(root = %root.path().display(), class = session.class(), "mode started");

        Ok(Self {
            resolver: PathResolver::new(root, session),
            store,
            settings,
            subscribers: Subscribers::new(),
            devices: DeviceRegistry::new(),
        })
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn language(&self) -> &str {
        &self.settings.language
    }

    pub fn user(&self) -> &str {
        self.resolver.session().user()
    }

    pub fn installer(&self) -> ArchiveInstaller {
        ArchiveInstaller::new(self.resolver.clone(), self.settings.language.clone())
    }

    /// Create every standard folder that is missing. Returns the ones created.
    pub fn prepare(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for place in PREPARED_PLACES {
            let path = self.resolver.resolve(place, &[]);
            if path.is_dir() {
                continue;
            }
            fs::create_dir_all(&path).map_err(|e| Error::Io {
                path: path.clone(),
                source: e,
            })?;
            tracing::info!(place = %place, path = %path.display(), "created folder");
            created.push(path);
        }
        Ok(created)
    }

    pub fn login(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if !USER_NAME.is_match(user) {
            return Err(Error::InvalidUser(user.to_string()));
        }
        self.rebind(user);
        tracing::info!(user, "logged in");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.rebind("");
    }

    fn rebind(&mut self, user: &str) {
        let session = Session::new(&self.settings.class_name, user);
        self.resolver = self.resolver.with_session(session);
    }

    /// The offer for the default inbox, if it holds a valid archive.
    pub fn pending_update(&self) -> Result<Option<UpdateOffer>> {
        let installer = self.installer();
        if !installer.check_content(None) {
            return Ok(None);
        }
        Ok(Some(installer.compare(None)?))
    }

    /// Delete the default inbox. Returns whether there was anything to delete.
    pub fn discard_pending_update(&self) -> Result<bool> {
        let inbox = self.resolver.resolve(Place::ZipInstallDefaultFile, &[]);
        Ok(cip_fs::remove_path(inbox)?)
    }

    /// Write [`SEARCH_PATH_FILE`] naming `main` into `site_dir` unless it is
    /// already there. Returns whether the file was written.
    pub fn register_search_path(&self, site_dir: &Path) -> Result<bool> {
        let file = site_dir.join(SEARCH_PATH_FILE);
        if file.is_file() {
            return Ok(false);
        }

        let main = self.resolver.main_root();
        cip_fs::atomic_write(
            &file,
            main.to_string_lossy().as_bytes(),
            cip_fs::AtomicWriteOptions::new(),
        )?;
        tracing::info!(path = %file.display(), "search path registered");
        Ok(true)
    }

    pub fn get_setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key)
    }

    /// Change one setting, persist it, and notify subscribers. Nothing happens
    /// when the value is unchanged.
    pub fn put_setting(&mut self, key: &str, value: &str) -> Result<bool> {
        if !self.settings.set(key, value) {
            return Ok(false);
        }

        self.store.save(&self.settings)?;
        if key == "class_name" {
            let user = self.user().to_string();
            self.rebind(&user);
        }
        self.subscribers.notify_all(&self.settings);
        Ok(true)
    }

    pub fn subscribe<S: SettingsSubscriber + 'static>(&mut self, subscriber: S) {
        self.subscribers.subscribe(subscriber);
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.devices
    }

    /// User panel of the configured devices module.
    pub fn device_user_panel(&self) -> DeviceLoad<'_, dyn DeviceUserPanel> {
        self.devices.load_user_panel(&self.settings.devices_module)
    }

    /// Service panel of the configured devices module.
    pub fn device_service_panel(&self) -> DeviceLoad<'_, dyn DeviceServicePanel> {
        self.devices.load_service_panel(&self.settings.devices_module)
    }

    /// Shipped examples and custom examples.
    pub fn examples(&self) -> Result<(Vec<ExampleNode>, Vec<ExampleNode>)> {
        let lang = self.language();
        let shipped = cip_lesson::example_tree(&self.resolver.resolve(Place::Examples, &[]), lang)?;
        let custom =
            cip_lesson::example_tree(&self.resolver.resolve(Place::CustomExamples, &[]), lang)?;
        Ok((shipped, custom))
    }

    pub fn lessons(&self) -> Result<Vec<LessonEntry>> {
        Ok(cip_lesson::student_lessons(&self.resolver, self.language())?)
    }

    pub fn add_example(&self, example_dir: &Path, overwrite: bool) -> Result<PathBuf> {
        Ok(cip_lesson::add_example(&self.resolver, example_dir, overwrite)?)
    }

    pub fn remove_lesson(&self, lesson_dir: &Path) -> Result<PathBuf> {
        let now = Local::now().naive_local();
        Ok(cip_lesson::remove_lesson(&self.resolver, lesson_dir, now)?)
    }

    pub fn create_private_lesson(&self, name: &str, overwrite: bool) -> Result<PathBuf> {
        Ok(cip_lesson::create_private_lesson(&self.resolver, name, overwrite)?)
    }
}
