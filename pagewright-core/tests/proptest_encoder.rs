//! Property-based tests for the value encoder.

use pagewright::writer::{encode, format_number};
use pagewright::{NameTree, Object};
use proptest::prelude::*;

fn unescape(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut bytes = body.iter();
    while let Some(&b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'b') => out.push(0x08),
            Some(b'f') => out.push(0x0C),
            Some(&other) => out.push(other),
            None => {}
        }
    }
    out
}

proptest! {
    #[test]
    fn test_numbers_have_at_most_six_decimals(n in -1e9f64..1e9f64) {
        let text = format_number(n).unwrap();
        prop_assert!(!text.contains('e') && !text.contains('E'));
        if let Some((_, fraction)) = text.split_once('.') {
            prop_assert!(fraction.len() <= 6, "{}", text);
            prop_assert!(!fraction.ends_with('0'), "{}", text);
        }
        let parsed: f64 = text.parse().unwrap();
        prop_assert!((parsed - n).abs() <= 5e-7 + 1e-9 * n.abs().max(1.0));
    }

    #[test]
    fn test_integers_print_without_fraction(n in -1_000_000i64..1_000_000i64) {
        prop_assert_eq!(format_number(n as f64).unwrap(), n.to_string());
    }

    #[test]
    fn test_huge_numbers_are_rejected(n in 1e21f64..1e300f64, negative in any::<bool>()) {
        let n = if negative { -n } else { n };
        prop_assert!(format_number(n).unwrap_err().is_validation());
    }

    #[test]
    fn test_ascii_literal_escapes_are_reversible(s in "[ -~\t\r\n]{0,64}") {
        let encoded = encode(&Object::String(s.clone()), None).unwrap();
        prop_assert_eq!(encoded[0], b'(');
        prop_assert_eq!(*encoded.last().unwrap(), b')');
        let body = &encoded[1..encoded.len() - 1];
        prop_assert!(!body.contains(&b'\n'));
        prop_assert_eq!(unescape(body), s.into_bytes());
    }

    #[test]
    fn test_non_ascii_strings_are_utf16_with_bom(s in "[a-z]{0,8}[é-ÿ][a-z]{0,8}") {
        let encoded = encode(&Object::String(s.clone()), None).unwrap();
        let raw = unescape(&encoded[1..encoded.len() - 1]);
        prop_assert_eq!(&raw[..2], &[0xFE, 0xFF]);
        let units: Vec<u16> = raw[2..]
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        prop_assert_eq!(String::from_utf16(&units).unwrap(), s);
    }

    #[test]
    fn test_name_tree_keys_are_sorted(keys in prop::collection::btree_set("[a-z]{1,6}", 1..10)) {
        let mut tree = NameTree::new();
        for key in keys.iter().rev() {
            tree.add(key.clone(), Object::Null);
        }
        let encoded = String::from_utf8(encode(&Object::NameTree(tree), None).unwrap()).unwrap();

        let positions: Vec<usize> = keys
            .iter()
            .map(|key| encoded.find(&format!("\n    ({key}) null")).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(encoded.contains("/Limits"), keys.len() > 1);
    }
}
