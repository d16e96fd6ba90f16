// File: purify-core/src/transforms.rs
//! Pure string transforms backing the leaf rule catalog.
//!
//! Every function here is a total `&str -> String` mapping with no state and no
//! failure mode. The rule machinery (value coercion, halting on absent values)
//! lives in [`crate::rule::StringRule`]; this module only knows about text.
//!
//! Character classes: letters are Unicode-aware (`\p{L}`), digits are ASCII
//! `0-9`, and whitespace is kept by the alphabetic filters.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref NON_ALPHA: Regex = Regex::new(r"[^\p{L}\s]").unwrap();
    static ref NON_ALPHA_NUMERIC: Regex = Regex::new(r"[^\p{L}0-9\s]").unwrap();
    static ref LINE_BREAK_TAGS: Regex = Regex::new(r"(?i)</p>|<br\s*/?>|</br>").unwrap();
    static ref NAME_SEPARATORS: Regex = Regex::new(r"[ &_=+:]").unwrap();
    static ref ILLEGAL_NAME: Regex = Regex::new(r"[^[:alnum:]\-.]").unwrap();
    static ref ILLEGAL_PATH: Regex = Regex::new(r"[^[:alnum:]~\-./]").unwrap();
    static ref DASHES: Regex = Regex::new(r"-+").unwrap();
    static ref SLASHES: Regex = Regex::new(r"/{2,}").unwrap();
}

/// Entities folded to plain text before the result is re-escaped.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&#8216;", "'"),
    ("&#8217;", "'"),
    ("&#8220;", "\""),
    ("&#8221;", "\""),
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
    ("&#34;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    // Must stay last so that "&amp;lt;" decodes to "&lt;" and not "<".
    ("&amp;", "&"),
];

/// Trims leading and trailing Unicode whitespace.
pub fn trim_space(value: &str) -> String {
    value.trim().to_string()
}

/// Trims leading ASCII spaces only; tabs and newlines are kept.
pub fn ltrim_space(value: &str) -> String {
    value.trim_start_matches(' ').to_string()
}

/// Trims trailing ASCII spaces only.
pub fn rtrim_space(value: &str) -> String {
    value.trim_end_matches(' ').to_string()
}

pub fn to_upper(value: &str) -> String {
    value.to_uppercase()
}

pub fn to_lower(value: &str) -> String {
    value.to_lowercase()
}

/// A word boundary for title casing: whitespace, or any ASCII character
/// that is not alphanumeric or `_`.
fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

/// Upper-cases the first letter of every word and leaves the rest untouched.
pub fn to_title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev = ' ';
    for c in value.chars() {
        if is_word_separator(prev) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

/// Splits an identifier-like string into words.
///
/// Non-alphanumeric characters separate words, and so do case transitions:
/// `firstName` -> `first`, `Name`; `HTTPServer` -> `HTTP`, `Server`.
fn split_words(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `first_name`, `first-name` and `first name` all become `FirstName`.
pub fn to_camel_case(value: &str) -> String {
    split_words(value).iter().map(|w| capitalize(w)).collect()
}

fn join_lowercase(value: &str, separator: &str) -> String {
    split_words(value)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `FirstName` becomes `first-name`.
pub fn to_kebab_case(value: &str) -> String {
    join_lowercase(value, "-")
}

/// `FirstName` becomes `first_name`, `HTTPServer` becomes `http_server`.
pub fn to_snake_case(value: &str) -> String {
    join_lowercase(value, "_")
}

/// Strips HTML tags and returns plain text.
///
/// Paragraph ends and `<br>` variants become newlines, common entities are
/// decoded, and any `<`, `>` or `&` left over is escaped again so the result
/// can never smuggle markup. A bare `&` followed by a space is kept as-is.
pub fn strip_html(value: &str) -> String {
    let mut output = if !value.contains(['<', '>']) {
        value.to_string()
    } else {
        let flattened = value.replace('\n', "");
        let with_breaks = LINE_BREAK_TAGS.replace_all(&flattened, "\n");
        let mut text = String::with_capacity(with_breaks.len());
        let mut in_tag = false;
        for c in with_breaks.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        text
    };

    for (entity, plain) in HTML_ENTITIES {
        output = output.replace(entity, plain);
    }

    output
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace("&amp; ", "& ")
}

fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ð' | 'Ď' | 'Đ' => "D",
        'ð' | 'ď' | 'đ' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Þ' => "TH",
        'þ' => "th",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ý' | 'Ŷ' | 'Ÿ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Folds accented Latin letters to their ASCII base letters.
pub fn strip_accents(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match fold_accent(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    out
}

/// Shared cleanup for file names and paths.
fn clean_segment(value: &str, illegal: &Regex) -> String {
    let trimmed = value.trim_matches(' ');
    let folded = strip_accents(trimmed);
    let dashed = NAME_SEPARATORS.replace_all(&folded, "-");
    let legal = illegal.replace_all(&dashed, "");
    DASHES.replace_all(&legal, "-").into_owned()
}

/// Makes a string safe to use as a file name: `My File_Name.TXT` -> `my-file-name.txt`.
///
/// Only the last path component is kept. The result may be empty.
pub fn to_name(value: &str) -> String {
    let lower = value.to_lowercase();
    let base = lower.rsplit('/').find(|part| !part.is_empty()).unwrap_or("");
    clean_segment(base, &ILLEGAL_NAME)
}

/// Makes a string safe to use as a relative or absolute path.
///
/// `..` sequences are removed and repeated slashes collapsed before the same
/// cleanup as [`to_name`] runs, keeping `/` and `~`.
pub fn to_path(value: &str) -> String {
    let lower = value.to_lowercase().replace("..", "");
    let collapsed = SLASHES.replace_all(&lower, "/");
    let path = match collapsed.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => &collapsed[..],
    };
    clean_segment(path, &ILLEGAL_PATH)
}

/// Keeps ASCII digits only.
pub fn to_numeric(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Keeps letters (any script) and whitespace.
pub fn to_alpha(value: &str) -> String {
    NON_ALPHA.replace_all(value, "").into_owned()
}

/// Keeps letters (any script), ASCII digits and whitespace.
pub fn to_alpha_numeric(value: &str) -> String {
    NON_ALPHA_NUMERIC.replace_all(value, "").into_owned()
}

/// Lower-cases the domain of an address with exactly one `@`.
///
/// The local part is case-sensitive and left alone. Anything that does not
/// split into exactly two parts is returned unchanged.
pub fn to_email(value: &str) -> String {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return value.to_string();
    };
    format!("{}@{}", local, domain.to_lowercase())
}

/// Lower-case hex SHA-256 digest of the UTF-8 bytes.
pub fn to_sha256(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}
