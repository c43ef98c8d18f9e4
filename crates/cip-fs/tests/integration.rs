use cip_fs::{ScratchDir, overwrite_tree, remove_path};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_remove_then_copy_is_repeatable() {
    let dir = tempdir().unwrap();
    let staged = dir.path().join("temp");
    let main = dir.path().join("main");
    fs::create_dir_all(staged.join("examples/loops")).unwrap();
    fs::write(staged.join("examples/loops/loops.py"), "for i in range(3): pass").unwrap();
    fs::create_dir_all(main.join("examples/old")).unwrap();

    for _ in 0..2 {
        remove_path(main.join("examples/old")).unwrap();
        overwrite_tree(staged.join("examples"), main.join("examples")).unwrap();
    }

    assert!(!main.join("examples/old").exists());
    assert_eq!(
        fs::read_to_string(main.join("examples/loops/loops.py")).unwrap(),
        "for i in range(3): pass"
    );
}

#[test]
fn test_scratch_removed_when_scope_fails() {
    let dir = tempdir().unwrap();
    let temp = dir.path().join("temp");

    let outcome = (|| -> Result<(), cip_fs::Error> {
        let scratch = ScratchDir::fresh(&temp)?;
        fs::write(scratch.path().join("partial.bin"), [0u8; 16]).unwrap();
        Err(cip_fs::Error::NotFound(scratch.path().join("codeinpython_config.xml")))
    })();

    assert!(outcome.is_err());
    assert!(!temp.exists());
}
