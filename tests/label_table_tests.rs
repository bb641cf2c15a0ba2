//! Tests for loading label/comment tables

use n8x305_dasm::{LabelEntry, LabelError, LabelTable};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_basic_table() {
    let table = LabelTable::parse(
        "pc,label,comment\n\
         0000,RESET,\"Power-on entry, clears AUX\"\n\
         0x0010,IDLE,\n\
         $03FF,,Last word of the 1K part\n",
    )
    .unwrap();

    assert_eq!(
        table.entries(),
        &[
            LabelEntry {
                pc: 0x0000,
                label: Some("RESET".to_string()),
                comment: Some("Power-on entry, clears AUX".to_string()),
            },
            LabelEntry {
                pc: 0x0010,
                label: Some("IDLE".to_string()),
                comment: None,
            },
            LabelEntry {
                pc: 0x03FF,
                label: None,
                comment: Some("Last word of the 1K part".to_string()),
            },
        ]
    );
}

#[test]
fn test_columns_in_any_order() {
    let table = LabelTable::parse("Comment,Notes,LABEL,PC\nwait here,ignored,SPIN,2a\n").unwrap();

    assert_eq!(table.label_for(0x2A), Some("SPIN"));
    assert_eq!(table.comment_for(0x2A), Some("wait here"));
}

#[test]
fn test_short_rows_leave_cells_empty() {
    let table = LabelTable::parse("pc,label,comment\n5,ONLY\n").unwrap();

    assert_eq!(table.label_for(5), Some("ONLY"));
    assert_eq!(table.comment_for(5), None);
}

#[test]
fn test_comment_whitespace_is_kept() {
    let table: LabelTable = "pc,label,comment\n7,STEP,\" step  head \"\n".parse().unwrap();

    assert_eq!(table.comment_for(7), Some(" step  head "));
}

#[test]
fn test_lookup_misses() {
    let table = LabelTable::parse("pc,label,comment\n5,HERE,\n").unwrap();

    assert!(table.lookup(6).is_none());
    assert_eq!(table.label_for(6), None);
}

#[test]
fn test_first_entry_for_address_wins() {
    let table: LabelTable = "pc,label,comment\n10,FIRST,one\n10,SECOND,two\n"
        .parse()
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.label_for(0x10), Some("FIRST"));
    assert_eq!(table.comment_for(0x10), Some("one"));
}

#[test]
fn test_insert_keeps_existing_priority() {
    let mut table = LabelTable::new();
    assert!(table.is_empty());

    table.insert(LabelEntry {
        pc: 0x20,
        label: Some("OLD".to_string()),
        comment: None,
    });
    table.insert(LabelEntry {
        pc: 0x20,
        label: Some("NEW".to_string()),
        comment: None,
    });

    assert_eq!(table.label_for(0x20), Some("OLD"));
}

#[test]
fn test_from_reader() {
    let text = b"pc,label,comment\n1,A,\n" as &[u8];
    let table = LabelTable::from_reader(text).unwrap();

    assert_eq!(table.label_for(1), Some("A"));
}

// ========== Errors ==========

#[test]
fn test_empty_text_has_no_header() {
    assert!(matches!(LabelTable::parse(""), Err(LabelError::MissingHeader)));
    assert!(matches!(LabelTable::parse("\n\n"), Err(LabelError::MissingHeader)));
}

#[test]
fn test_missing_column() {
    let err = LabelTable::parse("pc,label\n1,A\n").unwrap_err();

    assert!(matches!(err, LabelError::MissingColumn("comment")));
    assert_eq!(err.to_string(), "label table header has no `comment` column");
}

#[test]
fn test_invalid_pc_reports_line() {
    let err = LabelTable::parse("pc,label,comment\n1,A,\n\nnope,B,\n").unwrap_err();

    match err {
        LabelError::InvalidPc { line, value } => {
            assert_eq!(line, 4);
            assert_eq!(value, "nope");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unterminated_quote_does_not_panic() {
    // an unterminated quote runs to the end of input; it must not panic
    match LabelTable::parse("pc,label,comment\n1,A,\"open\n") {
        Ok(table) => assert_eq!(table.label_for(1), Some("A")),
        Err(err) => assert!(matches!(err, LabelError::Csv(_))),
    }
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("n8x305-dasm-no-such-labels.csv");
    let err = LabelTable::load(&path).unwrap_err();

    assert!(matches!(err, LabelError::Io(_)));
}
