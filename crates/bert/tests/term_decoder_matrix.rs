use bert::{decode, BertError, DecoderOptions, Term, TermDecoder, UnknownTag};
use proptest::prelude::*;

struct Fixture {
    name: &'static str,
    bytes: &'static [u8],
    expected: fn() -> Term,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "small_int_42",
        bytes: &[131, 97, 42],
        expected: || Term::Integer(42),
    },
    Fixture {
        name: "int_negative",
        bytes: &[131, 98, 0xff, 0xff, 0xfc, 0x18], // -1000
        expected: || Term::Integer(-1000),
    },
    Fixture {
        name: "small_tuple_1_2",
        bytes: &[131, 104, 2, 97, 1, 97, 2],
        expected: || Term::List(vec![Term::Integer(1), Term::Integer(2)]),
    },
    Fixture {
        name: "large_tuple_empty",
        bytes: &[131, 105, 0, 0, 0, 0],
        expected: || Term::List(vec![]),
    },
    Fixture {
        name: "map_a_7",
        bytes: &[131, 116, 0, 0, 0, 1, 100, 0, 1, b'a', 97, 7],
        expected: || Term::Map(vec![(Term::from("a"), Term::Integer(7))]),
    },
    Fixture {
        name: "nil",
        bytes: &[131, 106],
        expected: || Term::List(vec![]),
    },
    Fixture {
        name: "list_with_improper_tail",
        bytes: &[
            131, 108, 0, 0, 0, 1, // one element
            109, 0, 0, 0, 1, b'x', // "x"
            97, 9, // tail, discarded
        ],
        expected: || Term::List(vec![Term::from("x")]),
    },
    Fixture {
        name: "nested_map_in_list",
        bytes: &[
            131, 108, 0, 0, 0, 2, //
            116, 0, 0, 0, 1, 119, 2, b'i', b'd', 98, 0, 0, 0x01, 0x00, // %{id: 256}
            107, 0, 2, b'h', b'i', // 'hi'
            106,
        ],
        expected: || {
            Term::List(vec![
                Term::Map(vec![(Term::from("id"), Term::Integer(256))]),
                Term::Bytes(b"hi".to_vec()),
            ])
        },
    },
    Fixture {
        name: "small_bignum_2_pow_40",
        bytes: &[131, 110, 6, 0, 0, 0, 0, 0, 0, 1],
        expected: || Term::Integer(1 << 40),
    },
    Fixture {
        name: "new_float_one_third",
        bytes: &[131, 70, 0x3f, 0xd5, 0x55, 0x55, 0x55, 0x55, 0x55, 0x55],
        expected: || Term::Float(1.0 / 3.0),
    },
];

#[test]
fn fixture_matrix() {
    for fixture in FIXTURES {
        let got = decode(fixture.bytes).unwrap_or_else(|e| panic!("{}: {e}", fixture.name));
        assert_eq!(got, (fixture.expected)(), "{}", fixture.name);
    }
}

#[test]
fn every_proper_prefix_is_truncated() {
    for fixture in FIXTURES {
        for cut in 1..fixture.bytes.len() {
            let prefix = &fixture.bytes[..cut];
            match decode(prefix) {
                Err(BertError::TruncatedInput { .. }) => {}
                other => panic!("{} cut at {cut}: {other:?}", fixture.name),
            }
        }
    }
}

#[test]
fn string_longer_than_buffer() {
    assert_eq!(
        decode(&[131, 100, 0, 10, b'a', b'b']),
        Err(BertError::TruncatedInput {
            offset: 4,
            needed: 10,
            remaining: 2
        })
    );
}

#[test]
fn format_error_before_dispatch() {
    // 200 would be an unknown tag; the version check must fail first.
    let mut dec = TermDecoder::new();
    assert_eq!(dec.decode(&[132, 200]), Err(BertError::Format(132)));
    assert!(dec.unknown_tags().is_empty());
}

#[test]
fn unknown_tag_inside_map_continues() {
    let mut dec = TermDecoder::new();
    let bytes = [131, 116, 0, 0, 0, 2, 97, 1, 250, 97, 2, 97, 3];
    assert_eq!(
        dec.decode(&bytes),
        Ok(Term::Map(vec![
            (Term::Integer(1), Term::List(vec![])),
            (Term::Integer(2), Term::Integer(3)),
        ]))
    );
    assert_eq!(dec.unknown_tags(), &[UnknownTag { tag: 250, offset: 8 }]);
}

#[test]
fn trailing_bytes_are_ignored_but_counted() {
    let (term, used) = TermDecoder::new()
        .decode_with_consumed(&[131, 97, 5, 1, 2, 3])
        .unwrap();
    assert_eq!(term, Term::Integer(5));
    assert_eq!(used, 3);
}

#[test]
fn deep_nesting_hits_default_cap() {
    let depth = DecoderOptions::default().max_depth + 1;
    let mut bytes = vec![131];
    for _ in 0..depth {
        bytes.extend_from_slice(&[104, 1]);
    }
    bytes.extend_from_slice(&[97, 0]);
    assert_eq!(
        decode(&bytes),
        Err(BertError::DepthLimitExceeded(depth - 1))
    );
}

fn encode_int(value: i32) -> Vec<u8> {
    let mut out = vec![131, 98];
    out.extend_from_slice(&value.to_be_bytes());
    out
}

fn encode_bignum(value: i64) -> Vec<u8> {
    let mut magnitude = value.unsigned_abs().to_le_bytes().to_vec();
    while magnitude.len() > 1 && magnitude.last() == Some(&0) {
        magnitude.pop();
    }
    let mut out = vec![131, 110, magnitude.len() as u8, (value < 0) as u8];
    out.extend_from_slice(&magnitude);
    out
}

proptest! {
    #[test]
    fn i32_roundtrip(value in any::<i32>()) {
        prop_assert_eq!(decode(&encode_int(value)), Ok(Term::Integer(value as i64)));
    }

    #[test]
    fn bignum_roundtrip(value in any::<i64>()) {
        prop_assert_eq!(decode(&encode_bignum(value)), Ok(Term::Integer(value)));
    }

    #[test]
    fn arbitrary_input_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut input = vec![131];
        input.extend_from_slice(&bytes);
        let _ = TermDecoder::new().decode(&input);
    }
}
