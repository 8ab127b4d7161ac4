use lexicon_reader::{DecodeOptions, LexiconError, LexiconHeader, LexiconWriter, Macro, WordList};

fn header(name: &str) -> LexiconHeader {
    LexiconHeader {
        name: name.to_string(),
        description: None,
    }
}

fn words(list: &WordList) -> Vec<&str> {
    list.iter().collect()
}

fn subword(text: &str) -> Macro {
    Macro::Subword(text.to_string())
}

fn spelled_out(name: &str, source: &[&str]) -> WordList {
    WordList::from_bytes(&LexiconWriter::from_words(name, source).to_bytes()).unwrap()
}

#[test]
fn subroutine_reuses_subwords() {
    let macros = vec![
        Macro::Clear,
        subword("A"),
        subword("B"),
        Macro::Subroutine(vec![1, 2, 2, 1]),
    ];
    let list = WordList::from_parts(header("abba"), macros.clone(), vec![3]).unwrap();
    assert_eq!(words(&list), ["ABBA"]);
    assert!(list.has("ABBA"));
    assert!(!list.has("AB"));
    assert!(!list.has("abba"));

    let bytes = LexiconWriter::with_program("abba", macros.clone(), vec![3]).to_bytes();
    let decoded = WordList::from_bytes(&bytes).unwrap();
    assert_eq!(words(&decoded), ["ABBA"]);
    assert_eq!(decoded.macros(), macros.as_slice());
    assert_eq!(decoded.program(), &[3]);
    assert_eq!(decoded.name(), "abba");
}

#[test]
fn nested_subroutines_expand_in_order() {
    let macros = vec![
        Macro::Clear,
        subword("Z"),
        subword("Y"),
        Macro::Subroutine(vec![2, 2]),
        Macro::Subroutine(vec![1, 3, 1]),
    ];
    let bytes = LexiconWriter::with_program("zyyz", macros, vec![4]).to_bytes();
    let list = WordList::from_bytes(&bytes).unwrap();
    assert_eq!(words(&list), ["ZYYZ"]);
    assert!(list.has("ZYYZ"));
    assert!(!list.has("ZY"));
}

#[test]
fn mutual_recursion_is_rejected() {
    let macros = vec![
        Macro::Clear,
        subword("a"),
        Macro::Subroutine(vec![3]),
        Macro::Subroutine(vec![2]),
    ];
    let err = WordList::from_parts(header("loop"), macros, vec![2]).unwrap_err();
    match err {
        LexiconError::CyclicReference { macro_index, path } => {
            assert_eq!(macro_index, 2);
            assert_eq!(path, vec![2, 3, 2]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn unreachable_self_reference_is_still_rejected() {
    let macros = vec![subword("a"), Macro::Subroutine(vec![1])];
    let err = WordList::from_parts(header("self"), macros, vec![0]).unwrap_err();
    assert!(matches!(
        err,
        LexiconError::CyclicReference { macro_index: 1, ref path } if path == &[1, 1]
    ));
}

#[test]
fn deep_subroutine_chains_do_not_overflow_the_stack() {
    const DEPTH: usize = 10_000;
    let mut macros: Vec<Macro> = (0..DEPTH).map(|i| Macro::Subroutine(vec![i + 1])).collect();
    macros.push(subword("x"));

    let list = WordList::from_parts(header("deep"), macros, vec![0]).unwrap();
    assert_eq!(words(&list), ["x"]);
}

#[test]
fn expansion_limit_stops_exponential_growth() {
    let mut macros = vec![subword("ab")];
    for i in 1..=40 {
        macros.push(Macro::Subroutine(vec![i - 1, i - 1]));
    }
    let bytes = LexiconWriter::with_program("bomb", macros, vec![40]).to_bytes();
    let options = DecodeOptions::default().with_max_expanded_len(1_000_000);

    let err = WordList::from_bytes_with_options(&bytes, &options).unwrap_err();
    assert!(matches!(err, LexiconError::LimitExceeded { max: 1_000_000, .. }));
}

#[test]
fn expansion_limit_stops_before_building_a_wide_subroutine() {
    let mut macros = vec![subword("ab")];
    for i in 1..=9 {
        macros.push(Macro::Subroutine(vec![i - 1, i - 1]));
    }
    macros.push(Macro::Subroutine(vec![9; 100_000]));
    let options = DecodeOptions::default().with_max_expanded_len(2048);

    let bytes = LexiconWriter::with_program("wide", macros, vec![10]).to_bytes();
    let err = WordList::from_bytes_with_options(&bytes, &options).unwrap_err();
    // Fails on the third 1024-byte child, not after all of them.
    assert!(matches!(err, LexiconError::LimitExceeded { max: 2048, found: 3072, .. }));
}

#[test]
fn program_is_checked_before_each_instruction() {
    let macros = vec![subword("abcd"), Macro::Subroutine(vec![0, 0])];
    let bytes = LexiconWriter::with_program("top", macros, vec![1, 1, 1]).to_bytes();
    let options = DecodeOptions::default().with_max_expanded_len(20);

    let err = WordList::from_bytes_with_options(&bytes, &options).unwrap_err();
    assert!(matches!(err, LexiconError::LimitExceeded { max: 20, found: 24, .. }));
}

#[test]
fn membership_is_exact() {
    let list = spelled_out("colors", &["blue", "green"]);
    assert!(list.has("blue"));
    assert!(list.has("green"));
    assert!(!list.has("blu"));
    assert!(!list.has("bluee"));
    assert!(!list.has("Blue"));
    assert!(!list.has(""));
    assert_eq!(words(&list), ["blue", "green"]);
}

#[test]
fn membership_over_shared_prefixes() {
    let source = ["blue", "bluer", "bluest", "green", "greener", "greenery", "greenest"];
    let list = spelled_out("colors", &source);
    assert!(list.has("blue"));
    assert!(!list.has("blued"));
    assert!(list.has("bluer"));
    assert!(!list.has("blues"));
    assert!(list.has("bluest"));
    assert!(!list.has("greene"));
    assert!(list.has("greenery"));

    let first: Vec<&str> = list.iter().collect();
    let second: Vec<&str> = list.iter().collect();
    assert_eq!(first, source);
    assert_eq!(first, second);
}

#[test]
fn clears_separate_words_that_share_a_prefix() {
    let writer = LexiconWriter::from_words("cats", ["cat", "cats", "", "cat"]);
    assert_eq!(writer.macros()[0], Macro::Clear);

    let list = WordList::from_bytes(&writer.to_bytes()).unwrap();
    assert_eq!(words(&list), ["cat", "cats", "cat"]);
    assert_eq!(list.len(), 3);
    assert_eq!(list.distinct_len(), 2);
    assert!(list.has("cat"));
    assert!(list.has("cats"));
    assert!(!list.has("ca"));
}

#[test]
fn clear_inside_a_subroutine_ends_the_word() {
    let macros = vec![Macro::Clear, subword("o"), subword("n"), Macro::Subroutine(vec![1, 2, 0])];
    let list = WordList::from_parts(header("on"), macros, vec![3, 3, 1]).unwrap();
    assert_eq!(words(&list), ["on", "on", "o"]);
    assert_eq!(list.distinct_len(), 2);
}

#[test]
fn empty_words_are_dropped() {
    let macros = vec![Macro::Clear, subword("a"), subword("")];
    let list = WordList::from_parts(header("gaps"), macros, vec![0, 0, 1, 0, 2, 0, 0]).unwrap();
    assert_eq!(words(&list), ["a"]);
    assert!(!list.has(""));
}

#[test]
fn out_of_range_references_are_rejected() {
    let macros = vec![Macro::Subroutine(vec![5])];
    let err = WordList::from_parts(header("bad"), macros, vec![0]).unwrap_err();
    match err {
        LexiconError::InvalidReference { from, target, table_len } => {
            assert_eq!(from, "macro 0");
            assert_eq!(target, 5);
            assert_eq!(table_len, 1);
        }
        other => panic!("expected an invalid reference, got {other:?}"),
    }

    let err = WordList::from_parts(header("bad"), vec![subword("a")], vec![0, 2]).unwrap_err();
    assert!(matches!(
        err,
        LexiconError::InvalidReference { ref from, target: 2, table_len: 1 }
            if from == "instruction 1"
    ));
}

#[test]
fn iteration_restarts_from_the_beginning() {
    let list = spelled_out("x", &["one", "two", "three"]);
    let mut first = list.iter();
    assert_eq!(first.next(), Some("one"));

    assert_eq!(list.iter().collect::<Vec<_>>(), ["one", "two", "three"]);
    assert_eq!(list.iter().rev().next(), Some("three"));
    assert_eq!(list.iter().len(), 3);
    assert_eq!(first.next(), Some("two"));

    let mut seen = Vec::new();
    for word in &list {
        seen.push(word);
    }
    assert_eq!(seen, ["one", "two", "three"]);
}

#[test]
fn header_fields_round_trip() {
    let bytes = LexiconWriter::from_words("Palabras", ["sí"])
        .description("Spanish test words")
        .to_bytes();
    let list = WordList::from_bytes(&bytes).unwrap();
    assert_eq!(list.name(), "Palabras");
    assert_eq!(list.description(), Some("Spanish test words"));
    assert!(list.has("sí"));

    let bare = WordList::from_bytes(&LexiconWriter::new("").to_bytes()).unwrap();
    assert_eq!(bare.name(), "");
    assert_eq!(bare.description(), None);
    assert!(bare.is_empty());
}

#[test]
fn unknown_fields_are_skipped() {
    let mut bytes = vec![120, 0xAC, 0x02];
    bytes.extend_from_slice(&[113, 1, 2, 3, 4, 5, 6, 7, 8]);
    bytes.extend_from_slice(&[106, 3, b'x', b'y', b'z']);
    bytes.extend_from_slice(&[101, 1, 2, 3, 4]);
    bytes.extend(LexiconWriter::from_words("skip", ["ok"]).to_bytes());
    // An unknown varint field inside a macro message.
    bytes.extend_from_slice(&[0x1A, 0x05, 0x40, 0x96, 0x01, 0x0A, 0x00]);

    let list = WordList::from_bytes(&bytes).unwrap();
    assert_eq!(list.name(), "skip");
    assert_eq!(words(&list), ["ok"]);
    assert_eq!(list.macros().last(), Some(&Macro::Clear));
}

#[test]
fn unpacked_instructions_are_accepted() {
    let mut bytes = vec![0x1A, 0x02, 0x0A, 0x00];
    bytes.extend_from_slice(&[0x1A, 0x03, 0x12, 0x01, b'a']);
    bytes.extend_from_slice(&[32, 1, 32, 0, 32, 1]);

    let list = WordList::from_bytes(&bytes).unwrap();
    assert_eq!(list.program(), &[1, 0, 1]);
    assert_eq!(words(&list), ["a", "a"]);
}

#[test]
fn group_wire_types_are_rejected() {
    assert!(matches!(WordList::from_bytes(&[43]), Err(LexiconError::InvalidFormat(_))));
}

#[test]
fn truncated_buffer_is_out_of_bounds() {
    let mut bytes = LexiconWriter::from_words("cut", ["short"]).to_bytes();
    bytes.pop();
    assert!(matches!(WordList::from_bytes(&bytes), Err(LexiconError::OutOfBounds { .. })));
}

#[test]
fn invalid_utf8_reports_its_offset() {
    let err = WordList::from_bytes(&[0x0A, 0x02, 0xFF, 0xFE]).unwrap_err();
    assert!(matches!(err, LexiconError::InvalidUtf8 { offset: 2, .. }));
}

#[test]
fn nested_errors_report_offsets_in_the_whole_buffer() {
    // Packed instructions whose second varint is cut off at byte 3.
    let err = WordList::from_bytes(&[0x22, 0x02, 0x01, 0x80]).unwrap_err();
    assert!(matches!(err, LexiconError::OutOfBounds { offset: 3, len: 4, .. }));

    // The same inside a subroutine, two levels down.
    let err = WordList::from_bytes(&[0x1A, 0x04, 0x1A, 0x02, 0x01, 0x80]).unwrap_err();
    assert!(matches!(err, LexiconError::OutOfBounds { offset: 5, len: 6, .. }));

    let err = WordList::from_bytes(&[0x1A, 0x04, 0x12, 0x02, 0xFF, 0xFE]).unwrap_err();
    assert!(matches!(err, LexiconError::InvalidUtf8 { offset: 4, .. }));
}

#[test]
fn macro_without_a_variant_is_rejected() {
    assert!(matches!(WordList::from_bytes(&[0x1A, 0x00]), Err(LexiconError::InvalidFormat(_))));
}

#[test]
fn last_macro_variant_wins() {
    let list = WordList::from_bytes(&[0x1A, 0x05, 0x12, 0x01, b'x', 0x0A, 0x00]).unwrap();
    assert_eq!(list.macros(), &[Macro::Clear]);
    assert!(list.is_empty());
}

#[test]
fn decode_limits_are_enforced() {
    let bytes = LexiconWriter::from_words("limits", ["ab"]).to_bytes();

    let options = DecodeOptions::default().with_max_macros(2);
    let err = WordList::from_bytes_with_options(&bytes, &options).unwrap_err();
    assert!(matches!(err, LexiconError::LimitExceeded { max: 2, found: 3, .. }));

    let options = DecodeOptions::default().with_max_buffer_len(1);
    let err = WordList::from_bytes_with_options(&bytes, &options).unwrap_err();
    assert!(matches!(err, LexiconError::LimitExceeded { max: 1, .. }));

    let options = DecodeOptions::default().with_max_instructions(2);
    assert!(WordList::from_bytes_with_options(&bytes, &options).is_err());

    let generous = DecodeOptions::unlimited()
        .with_max_macros(3)
        .with_max_instructions(3)
        .with_max_expanded_len(3);
    assert!(WordList::from_bytes_with_options(&bytes, &generous).unwrap().has("ab"));
}

#[test]
fn empty_buffer_is_an_empty_list() {
    let list = WordList::from_bytes(&[]).unwrap();
    assert!(list.is_empty());
    assert_eq!(list.name(), "");
    assert_eq!(list.iter().next(), None);
    assert!(!list.has(""));
}

#[test]
fn concurrent_lookups_share_one_list() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WordList>();

    let list = spelled_out("shared", &["alpha", "beta"]);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(list.has("alpha"));
                    assert!(list.has("beta"));
                    assert!(!list.has("gamma"));
                }
            });
        }
    });
}
