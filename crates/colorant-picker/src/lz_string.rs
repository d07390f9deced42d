//! LZ-String's `EncodedURIComponent` format, the compression behind share links.
//!
//! Text is handled as UTF-16 code units, so non-ASCII names come out exactly as a browser
//! encodes them.

use std::collections::{HashMap, HashSet};

const URI_SAFE_ALPHABET: &[u8; 65] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-$";
const BITS_PER_CHAR: u8 = 6;
const READ_RESET: u8 = 1 << (BITS_PER_CHAR - 1);

const LITERAL_8: u32 = 0;
const LITERAL_16: u32 = 1;
const END_OF_STREAM: u32 = 2;

struct BitWriter {
    output: String,
    value: u8,
    position: u8,
}

impl BitWriter {
    /// Least significant bit first.
    fn write_bits(&mut self, mut value: u32, count: u32) {
        for _ in 0..count {
            self.write_bit((value & 1) as u8);
            value >>= 1;
        }
    }

    fn write_bit(&mut self, bit: u8) {
        self.value = (self.value << 1) | bit;

        if self.position == BITS_PER_CHAR - 1 {
            self.push_char();
        } else {
            self.position += 1;
        }
    }

    fn push_char(&mut self) {
        self.output.push(char::from(URI_SAFE_ALPHABET[usize::from(self.value)]));
        self.value = 0;
        self.position = 0;
    }

    fn finish(mut self) -> String {
        loop {
            self.value <<= 1;

            if self.position == BITS_PER_CHAR - 1 {
                self.push_char();
                return self.output;
            }

            self.position += 1;
        }
    }
}

struct Compressor {
    dictionary: HashMap<Vec<u16>, u32>,
    /// Single units that are in the dictionary but have not been written out yet.
    unwritten: HashSet<Vec<u16>>,
    dict_size: u32,
    num_bits: u32,
    enlarge_in: u32,
    writer: BitWriter,
}

impl Compressor {
    fn new() -> Self {
        Compressor {
            dictionary: HashMap::new(),
            unwritten: HashSet::new(),
            dict_size: 3,
            num_bits: 2,
            enlarge_in: 2,
            writer: BitWriter {
                output: String::new(),
                value: 0,
                position: 0,
            },
        }
    }

    fn add(&mut self, phrase: Vec<u16>) {
        self.dictionary.insert(phrase, self.dict_size);
        self.dict_size += 1;
    }

    fn count_code(&mut self) {
        self.enlarge_in -= 1;

        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }

    fn emit(&mut self, phrase: &[u16]) {
        if self.unwritten.remove(phrase) {
            let unit = u32::from(phrase[0]);

            if unit < 256 {
                self.writer.write_bits(LITERAL_8, self.num_bits);
                self.writer.write_bits(unit, 8);
            } else {
                self.writer.write_bits(LITERAL_16, self.num_bits);
                self.writer.write_bits(unit, 16);
            }

            self.count_code();
        } else if let Some(&code) = self.dictionary.get(phrase) {
            self.writer.write_bits(code, self.num_bits);
        }

        self.count_code();
    }
}

pub fn compress_to_encoded_uri_component(input: &str) -> String {
    let mut compressor = Compressor::new();
    let mut phrase: Vec<u16> = Vec::new();

    for unit in input.encode_utf16() {
        let single = vec![unit];
        if !compressor.dictionary.contains_key(&single) {
            compressor.unwritten.insert(single.clone());
            compressor.add(single);
        }

        let mut extended = phrase.clone();
        extended.push(unit);

        if compressor.dictionary.contains_key(&extended) {
            phrase = extended;
        } else {
            compressor.emit(&phrase);
            compressor.add(extended);
            phrase = vec![unit];
        }
    }

    if !phrase.is_empty() {
        compressor.emit(&phrase);
    }

    let num_bits = compressor.num_bits;
    compressor.writer.write_bits(END_OF_STREAM, num_bits);
    compressor.writer.finish()
}

struct BitReader {
    values: Vec<u8>,
    value: u8,
    position: u8,
    index: usize,
}

impl BitReader {
    fn read_bits(&mut self, count: u32) -> u32 {
        let mut bits = 0;

        for power in 0..count {
            let bit = self.value & self.position;
            self.position >>= 1;

            if self.position == 0 {
                self.position = READ_RESET;
                self.value = self.values.get(self.index).copied().unwrap_or(0);
                self.index += 1;
            }

            if bit != 0 {
                bits |= 1 << power;
            }
        }

        bits
    }
}

/// Returns `None` for empty, truncated or corrupt input. Characters outside the alphabet read
/// as zero, and spaces as `+`, the way a form-decoded query turns them.
pub fn decompress_from_encoded_uri_component(input: &str) -> Option<String> {
    let values: Vec<u8> = input
        .chars()
        .map(|ch| if ch == ' ' { '+' } else { ch })
        .map(|ch| {
            URI_SAFE_ALPHABET
                .iter()
                .position(|&c| char::from(c) == ch)
                .map_or(0, |i| i as u8)
        })
        .collect();

    let length = values.len();
    let first = *values.first()?;
    let mut reader = BitReader {
        values,
        value: first,
        position: READ_RESET,
        index: 1,
    };

    // Codes 0 to 2 are the markers and never index the dictionary
    let mut dictionary: Vec<Vec<u16>> = vec![Vec::new(); 3];
    let mut enlarge_in: u32 = 4;
    let mut num_bits: u32 = 3;

    let first_unit = match reader.read_bits(2) {
        LITERAL_8 => reader.read_bits(8) as u16,
        LITERAL_16 => reader.read_bits(16) as u16,
        _ => return None,
    };

    let mut previous = vec![first_unit];
    dictionary.push(previous.clone());
    let mut result = previous.clone();

    loop {
        if reader.index > length {
            return None;
        }

        let mut code = reader.read_bits(num_bits) as usize;

        match code as u32 {
            LITERAL_8 | LITERAL_16 => {
                let width = if code as u32 == LITERAL_8 { 8 } else { 16 };
                dictionary.push(vec![reader.read_bits(width) as u16]);
                code = dictionary.len() - 1;
                enlarge_in -= 1;
            }
            END_OF_STREAM => return String::from_utf16(&result).ok(),
            _ => {}
        }

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let entry = match dictionary.get(code) {
            Some(entry) => entry.clone(),
            None if code == dictionary.len() => {
                let mut entry = previous.clone();
                entry.push(previous[0]);
                entry
            }
            None => return None,
        };

        result.extend_from_slice(&entry);

        let mut added = previous;
        added.push(entry[0]);
        dictionary.push(added);
        enlarge_in -= 1;

        previous = entry;

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn matches_the_javascript_library() {
        assert_eq!(
            compress_to_encoded_uri_component("Hello, world"),
            "BIUwNmD2A0AEDukBOYAmQ"
        );
        assert_eq!(compress_to_encoded_uri_component("aaaaaaaaaaaaaaaaaaaa"), "IY1-kA");

        assert_eq!(
            decompress_from_encoded_uri_component("BIUwNmD2AEDukCcwBMCEQ").as_deref(),
            Some("Hello world!")
        );
    }

    #[test]
    fn keeps_non_ascii_text() {
        let text = r#"{"name":"深い青","rgb":[1,2,3]}"#;
        let encoded = compress_to_encoded_uri_component(text);

        assert!(encoded.bytes().all(|b| URI_SAFE_ALPHABET.contains(&b)));
        assert_eq!(
            decompress_from_encoded_uri_component(&encoded).as_deref(),
            Some(text)
        );
    }

    #[test]
    fn spaces_read_as_plus() {
        let encoded = compress_to_encoded_uri_component("dye_001 dye_002");
        assert_eq!(encoded, "CYTwpg+gDFCMAEpIwExA");

        assert_eq!(
            decompress_from_encoded_uri_component("CYTwpg gDFCMAEpIwExA").as_deref(),
            Some("dye_001 dye_002")
        );
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(decompress_from_encoded_uri_component(""), None);
    }
}
