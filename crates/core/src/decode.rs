//! Character-encoding resolution for fetched pages.
//!
//! Resolution order: charset declared in the `Content-Type` header, then a
//! strict UTF-8 decode, then `chardetng` statistical detection. GBK and
//! GB2312 (which `encoding_rs` folds into GBK) are always widened to
//! GB18030 so code-page edge characters do not turn into mojibake.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, GB18030, GBK, UTF_8};

/// HTML text together with the encoding it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding: &'static str,
}

/// Decode raw response bytes into a string.
///
/// Never fails: the last resort is the detector's guess with replacement
/// characters for undecodable sequences.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some(label) = content_type.and_then(extract_charset)
        && let Some(enc) = Encoding::for_label(label.as_bytes())
    {
        return decode_with(bytes, widen(enc));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        return DecodedHtml { html: text.to_string(), encoding: UTF_8.name() };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);
    tracing::debug!(encoding = guessed.name(), "detected page encoding");
    decode_with(bytes, widen(guessed))
}

/// Extract the charset parameter from a Content-Type value.
pub fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\'']).to_string())
        })
        .find(|charset| !charset.is_empty())
}

fn widen(enc: &'static Encoding) -> &'static Encoding {
    if enc == GBK { GB18030 } else { enc }
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, used, had_errors) = enc.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "page contained undecodable bytes");
    }
    DecodedHtml { html: text.into_owned(), encoding: used.name() }
}
