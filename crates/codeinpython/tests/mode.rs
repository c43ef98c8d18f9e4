use std::cell::Cell;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use cip_config::{SettingsSubscriber, SubscriberError};
use codeinpython::device::{DeviceLoad, DeviceModule, DeviceUserPanel, PanelError};
use codeinpython::{Error, Mode, PREPARED_PLACES, Place, SEARCH_PATH_FILE, SettingsStore, WorkspaceRoot};
use tempfile::{TempDir, tempdir};
use zip::write::SimpleFileOptions;

fn mode() -> (TempDir, Mode) {
    let dir = tempdir().unwrap();
    let root = WorkspaceRoot::new(dir.path().join("mu_code")).unwrap();
    let store = SettingsStore::new(dir.path().join("config/settings.toml"));
    let mode = Mode::new(root, store).unwrap();
    (dir, mode)
}

fn write_update(path: &Path) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    writer
        .start_file("codeinpython_config.xml", SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(b"<c><release>5</release><update><copy>code_lib</copy></update></c>")
        .unwrap();
    writer
        .start_file("code_lib/robot.py", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"def beep(): pass").unwrap();
    writer.finish().unwrap();
}

#[test]
fn prepare_creates_standard_folders_once() {
    let (_dir, mode) = mode();

    let created = mode.prepare().unwrap();
    assert_eq!(created.len(), PREPARED_PLACES.len());
    for place in PREPARED_PLACES {
        assert!(mode.resolver().resolve(place, &[]).is_dir(), "{place} missing");
    }
    assert!(mode.prepare().unwrap().is_empty());
}

#[test]
fn login_validates_and_rebinds() {
    let (_dir, mut mode) = mode();
    assert_eq!(mode.user(), "");

    mode.login("ala_1").unwrap();
    assert_eq!(mode.user(), "ala_1");
    assert!(
        mode.resolver()
            .resolve(Place::Student, &[])
            .ends_with("workspace/my_school/ala_1")
    );

    assert!(matches!(mode.login("../bob"), Err(Error::InvalidUser(_))));
    assert!(matches!(
        mode.login("a_name_that_is_far_too_long"),
        Err(Error::InvalidUser(_))
    ));
    assert_eq!(mode.user(), "ala_1");

    mode.logout();
    assert!(!mode.resolver().session().is_logged_in());
}

#[test]
fn pending_update_then_install() {
    let (_dir, mode) = mode();
    assert!(mode.pending_update().unwrap().is_none());

    mode.prepare().unwrap();
    let inbox = mode.resolver().resolve(Place::ZipInstallDefaultFile, &[]);
    write_update(&inbox);

    let offer = mode.pending_update().unwrap().unwrap();
    assert_eq!(offer.candidate.release, "5");
    assert!(offer.present.is_none());

    let report = mode.installer().apply(None).unwrap();
    assert!(report.is_empty());
    assert!(!inbox.exists());
    assert!(mode.resolver().resolve(Place::Libraries, &["robot.py"]).is_file());
    assert!(mode.pending_update().unwrap().is_none());
}

#[test]
fn discard_pending_update() {
    let (_dir, mode) = mode();
    mode.prepare().unwrap();
    let inbox = mode.resolver().resolve(Place::ZipInstallDefaultFile, &[]);
    write_update(&inbox);

    assert!(mode.discard_pending_update().unwrap());
    assert!(!inbox.exists());
    assert!(!mode.discard_pending_update().unwrap());
}

#[test]
fn register_search_path_writes_once() {
    let (dir, mode) = mode();
    let site = dir.path().join("site-packages");
    fs::create_dir_all(&site).unwrap();

    assert!(mode.register_search_path(&site).unwrap());
    let written = fs::read_to_string(site.join(SEARCH_PATH_FILE)).unwrap();
    assert_eq!(Path::new(&written), mode.resolver().main_root());

    fs::write(site.join(SEARCH_PATH_FILE), "custom").unwrap();
    assert!(!mode.register_search_path(&site).unwrap());
    assert_eq!(fs::read_to_string(site.join(SEARCH_PATH_FILE)).unwrap(), "custom");
}

struct Counter(Rc<Cell<usize>>);

impl SettingsSubscriber for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn settings_changed(&self, _settings: &codeinpython::Settings) -> Result<(), SubscriberError> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

#[test]
fn put_setting_persists_notifies_and_rebinds_class() {
    let (dir, mut mode) = mode();
    let calls = Rc::new(Cell::new(0));
    mode.subscribe(Counter(Rc::clone(&calls)));
    mode.login("ala").unwrap();

    assert!(mode.put_setting("class_name", "3b").unwrap());
    assert!(!mode.put_setting("class_name", "3b").unwrap());
    assert_eq!(calls.get(), 1);
    assert!(
        mode.resolver()
            .resolve(Place::Student, &[])
            .ends_with("workspace/3b/ala")
    );

    let reloaded = SettingsStore::new(dir.path().join("config/settings.toml"))
        .load()
        .unwrap();
    assert_eq!(reloaded.class_name, "3b");
    assert_eq!(mode.get_setting("class_name"), Some("3b"));
}

struct Panel;

impl DeviceUserPanel for Panel {
    fn open(&self, _language: &str) -> Result<(), PanelError> {
        Ok(())
    }
}

#[test]
fn device_panel_follows_configured_module() {
    let (_dir, mut mode) = mode();
    assert!(matches!(
        mode.device_user_panel(),
        DeviceLoad::NotAvailable { .. }
    ));

    mode.devices_mut()
        .register("devices", DeviceModule::new().user_panel(Panel));
    assert!(mode.device_user_panel().is_loaded());
    assert!(!mode.device_service_panel().is_loaded());

    mode.put_setting("devices_module", "robots").unwrap();
    match mode.device_user_panel() {
        DeviceLoad::NotAvailable { module, .. } => assert_eq!(module, "robots"),
        DeviceLoad::Loaded(_) => panic!("robots module is not registered"),
    }
}
