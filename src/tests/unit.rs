use crate::alphabet::{self, Group, TailBits};
use crate::decode::{decode_str_with, decode_utf16};
use crate::{
    decode, decode_chars, encode, encode_to_chars, encode_to_utf16,
    encoded_len, DecodeConfig, DecodeError,
};

fn units(s: &str) -> Vec<u32> {
    s.chars().map(u32::from).collect()
}

fn strict() -> DecodeConfig {
    let mut config = DecodeConfig::new();
    config.strict = true;
    config
}

fn relaxed() -> DecodeConfig {
    let mut config = DecodeConfig::new();
    config.relaxed = true;
    config
}

#[test]
fn test_empty_input() {
    let text = encode(&[]);
    assert_eq!(text, "\u{240f}");
    assert_eq!(decode(&text), Ok(vec![]));
}

#[test]
fn test_single_zero_word() {
    assert_eq!(encode(&[0]), "\u{3400}\u{3400}\u{3400}\u{2402}");
    assert_eq!(decode("\u{3400}\u{3400}\u{3400}\u{2402}"), Ok(vec![0]));
}

#[test]
fn test_single_all_ones_word() {
    // The third group holds the last two data bits followed by padding.
    let text = encode(&[u32::MAX]);
    assert_eq!(units(&text), [0xf4a3, 0xf4a3, 0x944a, 0x2402]);
    assert_eq!(decode(&text), Ok(vec![u32::MAX]));
}

#[test]
fn test_known_word() {
    let text = encode(&[0x1234_5678]);
    assert_eq!(units(&text), [0x3d1a, 0x499e, 0x3400, 0x2402]);
}

#[test]
fn test_terminator_only() {
    assert_eq!(decode("\u{240f}"), Ok(vec![]));
}

#[test]
fn test_full_tail_keeps_every_word() {
    // 15 words are 480 bits, exactly 32 groups.
    let words: Vec<u32> = (0..15).map(|i| i * 0x0101_0101).collect();
    let text = encode(&words);
    assert_eq!(text.chars().count(), 33);
    assert_eq!(text.chars().last(), Some('\u{240f}'));
    assert_eq!(decode(&text), Ok(words));
}

#[test]
fn test_encoded_len() {
    assert_eq!(encoded_len(0), Some(1));
    assert_eq!(encoded_len(1), Some(4));
    assert_eq!(encoded_len(2), Some(6));
    assert_eq!(encoded_len(15), Some(33));
    assert_eq!(encoded_len(usize::MAX), None);
}

#[test]
fn test_encoder_size_hint_is_exact() {
    let words = [1, 2, 3];
    let mut chars = encode_to_chars(&words);
    assert_eq!(chars.len(), 8);
    chars.next();
    assert_eq!(chars.len(), 7);
    assert_eq!(chars.by_ref().count(), 7);
    assert_eq!(chars.len(), 0);
    assert_eq!(chars.next(), None);
}

#[test]
fn test_utf16_matches_string() {
    let words = [0xdead_beef, 0, 7, u32::MAX];
    let text = encode(&words);
    let utf16: Vec<u16> = text.encode_utf16().collect();
    assert_eq!(encode_to_utf16(&words), utf16);
    assert_eq!(decode_utf16(utf16), Ok(words.to_vec()));
}

#[test]
fn test_alphabet_boundaries() {
    let cases = [
        (0, 0x3400),
        (6581, 0x4db5),
        (6582, 0x4e00),
        (27483, 0x9fa5),
        (27484, 0xe000),
        (32767, 0xf4a3),
    ];
    for (group, unit) in cases {
        let g = Group::new(group).unwrap();
        assert_eq!(alphabet::to_unit(g), unit, "group {}", group);
        assert_eq!(u32::from(alphabet::to_char(g)), u32::from(unit));
        assert_eq!(alphabet::from_char(unit.into()), Some(g));
    }
    for c in [0x33ff, 0x4db6, 0x4dff, 0x9fa6, 0xdfff, 0xf4a4, 0x240f] {
        assert_eq!(alphabet::from_char(c), None, "U+{:04X}", c);
    }
    assert_eq!(Group::new(32768), None);
}

#[test]
fn test_terminators() {
    assert_eq!(alphabet::from_terminator(0x2400), None);
    assert_eq!(alphabet::from_terminator(0x2410), None);
    assert_eq!(alphabet::from_terminator(0x3400), None);
    for bits in 1..=15 {
        let tail = TailBits::new(bits).unwrap();
        let c = alphabet::to_terminator(tail);
        assert_eq!(u32::from(c), 0x2400 + u32::from(bits));
        let unit = alphabet::to_terminator_unit(tail);
        assert_eq!(unit, 0x2400 + u16::from(bits));
        assert_eq!(alphabet::from_terminator(c.into()), Some(tail));
    }
    assert_eq!(TailBits::new(0), None);
    assert_eq!(TailBits::new(16), None);
}

#[test]
fn test_empty_string_is_missing_terminator() {
    assert_eq!(decode(""), Err(DecodeError::MissingTerminator));
    assert_eq!(DecodeError::MissingTerminator.codepoint(), None);
}

#[test]
fn test_rejects_missing_terminator_at_end() {
    assert_eq!(decode("\u{3400}"), Err(DecodeError::InvalidEncoding(0x3400)));
}

#[test]
fn test_rejects_bad_data_char() {
    let err = decode("\u{3400}!\u{2402}").unwrap_err();
    assert_eq!(err, DecodeError::InvalidEncoding(0x21));
    assert_eq!(err.codepoint(), Some(0x21));
    assert_eq!(err.to_string(), "invalid encoding U+0021");
}

#[test]
fn test_first_bad_char_is_reported() {
    assert_eq!(
        decode("\u{0}\u{1}\u{240f}"),
        Err(DecodeError::InvalidEncoding(0))
    );
}

#[test]
fn test_rejects_lone_surrogate() {
    assert_eq!(
        decode_utf16([0x3400, 0xd800, 0x240f]),
        Err(DecodeError::InvalidEncoding(0xd800))
    );
}

#[test]
fn test_rejects_astral_char() {
    assert_eq!(
        decode_chars(['\u{1f600}', '\u{240f}']),
        Err(DecodeError::InvalidEncoding(0x1f600))
    );
}

#[test]
fn test_terminator_in_data_position() {
    let mut text = encode(&[1, 2, 3]);
    assert_eq!(text.chars().last(), Some('\u{2406}'));
    text.push_str("trailing");
    assert_eq!(decode(&text), Err(DecodeError::InvalidEncoding(0x2406)));
    assert_eq!(decode_str_with(&text, relaxed()), Ok(vec![1, 2, 3]));
}

#[test]
fn test_relaxed_still_requires_terminator() {
    assert_eq!(
        decode_str_with("\u{3400}\u{3400}", relaxed()),
        Err(DecodeError::InvalidEncoding(0x3400))
    );
}

#[test]
fn test_strict_accepts_encoder_output() {
    let cases: [&[u32]; 4] = [&[], &[0], &[u32::MAX, 5], &[9; 15]];
    for words in cases {
        let text = encode(words);
        assert_eq!(decode_str_with(&text, strict()), Ok(words.to_vec()));
    }
}

#[test]
fn test_partial_word_kept_when_tail_is_full() {
    assert_eq!(decode("\u{3400}\u{240f}"), Ok(vec![0]));
    assert_eq!(
        decode_str_with("\u{3400}\u{240f}", strict()),
        Err(DecodeError::BadLength)
    );
}

#[test]
fn test_short_tail_without_data() {
    assert_eq!(decode("\u{2402}"), Ok(vec![]));
    assert_eq!(
        decode_str_with("\u{2402}", strict()),
        Err(DecodeError::BadLength)
    );
}

#[test]
fn test_padding_bits() {
    let text = "\u{3400}\u{3400}\u{3401}\u{2402}";
    assert_eq!(decode(text), Ok(vec![0]));
    assert_eq!(
        decode_str_with(text, strict()),
        Err(DecodeError::NonZeroPadding)
    );
}
