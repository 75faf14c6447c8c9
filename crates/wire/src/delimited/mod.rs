//! CSV wire format for archived artifacts
//!
//! - [`encode_artifact`] renders an artifact to delimited text
//! - [`decode_csv`] / [`read_csv`] read such text back into string cells

mod decode;
mod encode;

pub use decode::{decode_csv, read_csv, CsvTable, DecodeError};
pub use encode::{encode_artifact, encode_artifact_with, encode_cell, DEFAULT_DELIMITER};

/// Byte form of a field delimiter.
///
/// `None` for non-ASCII characters and for `"`, CR and LF, which would make
/// records ambiguous.
pub fn delimiter_byte(delimiter: char) -> Option<u8> {
    match delimiter {
        '"' | '\n' | '\r' => None,
        c if c.is_ascii() => Some(c as u8),
        _ => None,
    }
}

#[cfg(test)]
mod roundtrip_tests {
    use super::*;
    use proptest::prelude::*;
    use runarchive_core::{Artifact, Record, Value};

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(','), Some(b','));
        assert_eq!(delimiter_byte('\t'), Some(b'\t'));
        assert_eq!(delimiter_byte('"'), None);
        assert_eq!(delimiter_byte('\n'), None);
        assert_eq!(delimiter_byte('\r'), None);
        assert_eq!(delimiter_byte('§'), None);
    }

    #[test]
    fn test_single_column_gaps_survive_round_trip() {
        let artifact = Artifact::with_rows(
            "gaps",
            vec![
                Record::new().with("A", 1),
                Record::new().with("A", Value::Null),
                Record::new().with("A", 3),
            ],
        );
        let table = decode_csv(&encode_artifact(&artifact).unwrap(), ',').unwrap();
        assert_eq!(table.rows, vec![vec!["1"], vec![""], vec!["3"]]);
    }

    #[test]
    fn test_round_trip_preserves_row_order() {
        let artifact = Artifact::with_rows(
            "sample",
            vec![
                Record::new().with("A", 1).with("B", 4),
                Record::new().with("A", 2).with("B", 5),
            ],
        );
        let text = encode_artifact(&artifact).unwrap();
        let table = decode_csv(&text, ',').unwrap();
        assert_eq!(table.header, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "4"], vec!["2", "5"]]);
    }

    proptest! {
        #[test]
        fn prop_string_cells_survive_round_trip(
            cells in proptest::collection::vec("[a-z ,\"\n\r]{1,12}", 1..6)
        ) {
            let mut row = Record::new();
            for (i, cell) in cells.iter().enumerate() {
                row.insert(format!("c{i}"), cell.as_str());
            }
            let artifact = Artifact::with_rows("p", vec![row]);
            let text = encode_artifact(&artifact).unwrap();
            let table = decode_csv(&text, ',').unwrap();
            prop_assert_eq!(table.rows.len(), 1);
            prop_assert_eq!(&table.rows[0], &cells);
        }

        #[test]
        fn prop_header_is_first_seen_order(
            names in proptest::collection::vec("[a-e]", 1..12)
        ) {
            let rows: Vec<Record> = names
                .iter()
                .map(|n| Record::new().with(n.as_str(), 1))
                .collect();
            let artifact = Artifact::with_rows("p", rows);

            let mut expected: Vec<String> = Vec::new();
            for n in &names {
                if !expected.contains(n) {
                    expected.push(n.clone());
                }
            }

            let text = encode_artifact(&artifact).unwrap();
            let table = decode_csv(&text, ',').unwrap();
            prop_assert_eq!(table.header, expected);
            prop_assert_eq!(table.rows.len(), names.len());
        }
    }
}
