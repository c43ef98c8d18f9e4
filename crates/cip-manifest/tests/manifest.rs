use cip_manifest::{Manifest, ParseError, UpdateOp};

#[test]
fn several_update_sections_are_concatenated() {
    let manifest = Manifest::parse(
        b"<c>
            <release>1</release>
            <update><remove>a</remove><copy>b</copy></update>
            <update><copy>c</copy></update>
          </c>",
    )
    .unwrap();

    assert_eq!(
        manifest.update,
        vec![
            UpdateOp::Remove("a".into()),
            UpdateOp::Copy("b".into()),
            UpdateOp::Copy("c".into()),
        ]
    );
}

#[test]
fn unknown_entries_are_ignored() {
    let manifest =
        Manifest::parse(b"<c><release>1</release><update><rename>x</rename></update></c>")
            .unwrap();
    assert!(manifest.update.is_empty());
}

#[test]
fn empty_entry_keeps_empty_path() {
    let manifest = Manifest::parse(b"<c><update><remove/></update></c>").unwrap();
    assert_eq!(manifest.update, vec![UpdateOp::Remove(String::new())]);
}

#[test]
fn not_xml_fails_with_kind() {
    let err = Manifest::parse(b"PK\x03\x04 binary").unwrap_err();
    assert!(matches!(err, ParseError::NoRoot | ParseError::Xml(_)));
}
