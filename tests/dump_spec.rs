use hexfmt::dump::assembler::RowAssembler;
use hexfmt::dump::decoder::WordDecoder;
use hexfmt::dump::reader::ByteReader;
use hexfmt::dump::types::models::{DecodedWord, RowEvent, Value};
use hexfmt::dump::types::word_type::{Endian, WordType};
use hexfmt::{DumpError, Dumper, Rule, Theme};

fn dump_lines(dumper: &Dumper, data: &[u8]) -> Vec<String> {
    dumper
        .lines(data)
        .map(|line| line.expect("line ok").trim_end_matches('\n').to_string())
        .collect()
}

fn decode_words(name: &str, data: &[u8], zero_pad: bool) -> Vec<DecodedWord> {
    let word = WordType::lookup(name).expect("type in registry");
    let reader = ByteReader::new(data, 0, None);
    WordDecoder::new(reader, word, zero_pad)
        .map(|w| w.expect("decode ok"))
        .collect()
}

#[test]
fn default_dump_matches_canonical_layout() {
    let expected = format!(
        "00000000  68 65 6c 6c 6f 00{}|hello.|\n00000006\n",
        " ".repeat(32)
    );
    assert_eq!(hexfmt::hexdump(b"hello\0").expect("dump"), expected);
}

#[test]
fn empty_input_emits_only_the_trailer() {
    assert_eq!(hexfmt::hexdump(b"").expect("dump"), "00000000\n");
}

#[test]
fn dump_returns_total_bytes_consumed() {
    let dumper = Dumper::builder().build().expect("default config");
    let mut out = Vec::new();
    let consumed = dumper.dump(&b"hello\0"[..], &mut out).expect("dump");
    assert_eq!(consumed, 6);
}

#[test]
fn repeated_rows_collapse_to_a_single_marker() {
    let data = vec![b'A'; 64];
    let dumper = Dumper::builder().build().expect("default config");
    let lines = dump_lines(&dumper, &data);

    assert_eq!(lines.len(), 3, "row + marker + trailer, got {:?}", lines);
    assert!(
        lines[0].starts_with("00000000  41 41"),
        "first row is shown in full: {:?}",
        lines[0]
    );
    assert_eq!(lines[1], "*");
    assert_eq!(lines[2], "00000040");
}

#[test]
fn repeating_option_shows_every_row() {
    let data = vec![b'A'; 64];
    let dumper = Dumper::builder().repeating(true).build().expect("config");
    let lines = dump_lines(&dumper, &data);

    assert_eq!(lines.len(), 5, "four rows + trailer, got {:?}", lines);
    for (i, line) in lines[..4].iter().enumerate() {
        assert!(
            line.starts_with(&format!("{:08x}  41", i * 16)),
            "row {} carries its real offset: {:?}",
            i,
            line
        );
    }
    assert_eq!(lines[4], "00000040");
}

#[test]
fn assembler_resumes_after_a_repeat_run() {
    // Rows: A, B, B, B, C. The first B prints, the run collapses to one
    // marker, and C resumes with its true offset.
    let data = [
        vec![0x00u8; 16],
        vec![0x11; 16],
        vec![0x11; 16],
        vec![0x11; 16],
        vec![0x22; 16],
    ]
    .concat();

    let word = WordType::lookup("byte").expect("byte type");
    let reader = ByteReader::new(&data[..], 0, None);
    let decoder = WordDecoder::new(reader, word, false);
    let mut rows = RowAssembler::new(decoder, 16, true, 0);

    let offsets: Vec<Option<u64>> = (&mut rows)
        .map(|event| match event.expect("event ok") {
            RowEvent::Row(row) => Some(row.offset),
            RowEvent::Repeat => None,
        })
        .collect();

    assert_eq!(offsets, vec![Some(0), Some(16), None, Some(64)]);
    assert_eq!(rows.bytes_consumed(), 80);
}

#[test]
fn trailing_repeat_run_emits_exactly_one_marker() {
    let data = [vec![0x00u8; 16], vec![0x11; 16], vec![0x11; 16], vec![0x11; 16]].concat();
    let dumper = Dumper::builder().build().expect("config");
    let lines = dump_lines(&dumper, &data);

    assert_eq!(
        lines.iter().filter(|l| *l == "*").count(),
        1,
        "one marker for the whole trailing run: {:?}",
        lines
    );
    assert_eq!(lines.last().map(String::as_str), Some("00000040"));
}

#[test]
fn uint16_le_decodes_per_word_byte_order() {
    let words = decode_words("uint16_le", b"ABAB", false);
    let values: Vec<Option<Value>> = words.iter().map(|w| w.value).collect();
    assert_eq!(
        values,
        vec![Some(Value::UInt(0x4241)), Some(Value::UInt(0x4241))]
    );

    let words = decode_words("uint16_be", b"ABAB", false);
    let values: Vec<Option<Value>> = words.iter().map(|w| w.value).collect();
    assert_eq!(
        values,
        vec![Some(Value::UInt(0x4142)), Some(Value::UInt(0x4142))]
    );
}

#[test]
fn partial_tail_without_zero_pad_stays_undecoded() {
    let data = [b"AAAA".repeat(4), b"ABC".to_vec()].concat();
    let words = decode_words("uint32_le", &data, false);

    let last = words.last().expect("trailing word");
    assert_eq!(last.value, None, "short tail has no decoded value");
    assert_eq!(last.raw, b"ABC".to_vec());

    // Rendered: numeric slot blank, raw chars still shown.
    let dumper = Dumper::builder().word_type("uint32_le").build().expect("config");
    let lines = dump_lines(&dumper, &data);
    assert_eq!(lines.len(), 3, "two rows + trailer: {:?}", lines);
    assert_eq!(
        lines[1],
        format!("00000010  {}  |ABC|", " ".repeat(35)),
        "blank numeric column, chars survive"
    );
    assert_eq!(lines[2], "00000013");
}

#[test]
fn partial_tail_with_zero_pad_decodes_fully() {
    let data = [b"AAAA".repeat(4), b"ABC".to_vec()].concat();
    let words = decode_words("uint32_le", &data, true);

    let last = words.last().expect("trailing word");
    assert_eq!(last.raw, b"ABC\0".to_vec(), "padded raw bytes are reported");
    assert_eq!(last.value, Some(Value::UInt(0x00434241)));

    let dumper = Dumper::builder()
        .word_type("uint32_le")
        .zero_pad(true)
        .build()
        .expect("config");
    let lines = dump_lines(&dumper, &data);
    assert!(
        lines[1].starts_with("00000010  00434241"),
        "padded word decodes normally: {:?}",
        lines[1]
    );
    assert!(lines[1].ends_with("|ABC.|"), "pad byte scrubs to '.': {:?}", lines[1]);
}

#[test]
fn skip_and_length_window_the_source() {
    let dumper = Dumper::builder().skip(2).length(3).build().expect("config");
    let lines = dump_lines(&dumper, b"abcdefgh");

    assert_eq!(
        lines[0],
        format!("00000000  63 64 65{}|cde|", " ".repeat(41)),
        "window is c..e"
    );
    assert_eq!(lines[1], "00000003");
}

#[test]
fn skip_past_the_end_yields_an_empty_dump() {
    let dumper = Dumper::builder().skip(100).build().expect("config");
    let lines = dump_lines(&dumper, b"abc");
    assert_eq!(lines, vec!["00000000".to_string()]);
}

#[test]
fn group_columns_inserts_an_extra_spacer() {
    let dumper = Dumper::builder()
        .columns(4)
        .group_columns(2)
        .build()
        .expect("config");
    let lines = dump_lines(&dumper, &[0u8, 1, 2, 3]);

    assert_eq!(lines[0], "00000000  00 01  02 03  |....|");
    assert_eq!(lines[1], "00000004");
}

#[test]
fn index_base_is_independent_of_the_data_base() {
    let dumper = Dumper::builder().index_base(10).build().expect("config");
    let lines = dump_lines(&dumper, b"hello\0");

    assert!(lines[0].starts_with("0000000000  68"), "decimal index: {:?}", lines[0]);
    assert_eq!(lines[1], "0000000006");
}

#[test]
fn encoded_char_column_shows_decoded_text() {
    let dumper = Dumper::builder().encoding("utf-8").build().expect("config");
    let lines = dump_lines(&dumper, "héllo".as_bytes());

    assert_eq!(
        lines[0],
        format!("00000000  68 c3 a9 6c 6c 6f{}|héllo|", " ".repeat(32))
    );
    assert_eq!(lines[1], "00000006");
}

#[test]
fn char_typed_dump_inlines_characters_and_drops_the_side_column() {
    let dumper = Dumper::builder().word_type("char").build().expect("config");
    let lines = dump_lines(&dumper, b"A\n\x90");

    assert_eq!(lines[0], "00000000     A   \\n -112");
    assert_eq!(lines[1], "00000003");

    // Requesting the column explicitly still has no effect for char types.
    let dumper = Dumper::builder()
        .word_type("uchar")
        .chars_column(true)
        .build()
        .expect("config");
    let lines = dump_lines(&dumper, b"A");
    assert!(!lines[0].contains('|'), "no |...| column: {:?}", lines[0]);
}

#[test]
fn float_rows_render_in_exponential_columns() {
    let data: Vec<u8> = 1.0f32.to_le_bytes().repeat(4);
    let dumper = Dumper::builder().word_type("float_le").build().expect("config");
    let lines = dump_lines(&dumper, &data);

    let field = [" 1.000000e+00"; 4].join(" ");
    assert_eq!(lines[0], format!("00000000  {}  |...?...?...?...?|", field));
    assert_eq!(lines[1], "00000010");
}

#[test]
fn round_trip_reencodes_to_the_original_bytes() {
    fn encode(value: Value, word: &WordType) -> Vec<u8> {
        let bits = match value {
            Value::UInt(v) => v,
            // Two's-complement truncation to the word width.
            Value::Int(v) => v as u64,
            Value::Float(v) => {
                if word.size == 4 {
                    (v as f32).to_bits() as u64
                } else {
                    v.to_bits()
                }
            }
        };
        let mut bytes = bits.to_le_bytes()[..word.size].to_vec();
        if word.endian == Endian::Big {
            bytes.reverse();
        }
        bytes
    }

    let data: Vec<u8> = (0u8..=255).collect();
    for name in ["byte", "int8", "uint16_le", "int16_be", "uint32_be", "int64_le", "uint64_be"] {
        let word = WordType::lookup(name).expect("type in registry");
        let mut rebuilt = Vec::new();
        for decoded in decode_words(name, &data, false) {
            let value = decoded.value.expect("full words only");
            rebuilt.extend(encode(value, &word));
        }
        assert_eq!(rebuilt, data, "round trip failed for {}", name);
    }
}

#[test]
fn configuration_errors_fire_before_any_data_is_read() {
    assert!(matches!(
        Dumper::builder().word_type("int13").build(),
        Err(DumpError::UnknownType(_))
    ));
    assert!(matches!(
        Dumper::builder().word_type("double_le").base(2).build(),
        Err(DumpError::IncompatibleType { .. })
    ));
    assert!(matches!(
        Dumper::builder().base(7).build(),
        Err(DumpError::UnsupportedBase(7))
    ));
    assert!(matches!(
        Dumper::builder().encoding("klingon-8").build(),
        Err(DumpError::UnknownEncoding(_))
    ));
    assert!(matches!(
        Dumper::builder().columns(0).build(),
        Err(DumpError::InvalidConfig(_))
    ));
    assert!(matches!(
        Dumper::builder().group_columns(0).build(),
        Err(DumpError::InvalidConfig(_))
    ));
}

#[test]
fn themed_columns_wrap_in_ansi_sequences() {
    let theme = Theme::new()
        .with_index(Rule::new().with_default("cyan").expect("style"))
        .with_chars(Rule::new().highlight("ell", "bold").expect("style"));
    let dumper = Dumper::builder().theme(theme).build().expect("config");
    let lines = dump_lines(&dumper, b"hello\0");

    assert!(
        lines[0].starts_with("\u{1b}[36m00000000\u{1b}[0m  68 65"),
        "index column styled: {:?}",
        lines[0]
    );
    assert!(
        lines[0].ends_with("|h\u{1b}[1mell\u{1b}[0mo.|"),
        "chars highlight painted inside the delimiters: {:?}",
        lines[0]
    );
    assert!(
        lines[1].starts_with("\u{1b}[36m"),
        "trailer uses the index rule: {:?}",
        lines[1]
    );
}

#[test]
fn default_columns_follow_the_word_size() {
    let dumper = Dumper::builder().word_type("uint64_le").build().expect("config");
    assert_eq!(dumper.columns(), 2);

    let dumper = Dumper::builder().word_type("uint16_le").build().expect("config");
    assert_eq!(dumper.columns(), 8);

    let dumper = Dumper::builder().build().expect("config");
    assert_eq!(dumper.columns(), 16);
}
