//! Deterministic identifier transforms.
//!
//! The case transforms here are context-free and never consult the document
//! model. They intentionally keep a couple of lossy behaviours that generated
//! names depend on:
//!
//! - [`pascal_case`] lower-cases everything after the first character of each
//!   word, so `lawId` becomes `Lawid`.
//! - [`snake_case`] has no acronym detection, so `HTTPCode` becomes
//!   `h_t_t_p_code`.
//!
//! The `*_name` helpers and [`ident`] sit on top of the case transforms and
//! turn their output into something that is always a legal Rust identifier.

use proc_macro2::{Ident, Span};

/// Keywords that must be emitted as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers and get a trailing underscore.
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super", "_"];

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c == ' '
}

/// Converts a string to PascalCase.
///
/// Splits on `_`, `-` and space, upper-cases the first character of every
/// non-empty word and lower-cases the rest.
///
/// ## Examples
///
/// ```
/// use lawgen_openapi::naming::pascal_case;
///
/// assert_eq!(pascal_case("law_revision"), "LawRevision");
/// assert_eq!(pascal_case("get-law-data"), "GetLawData");
/// // case inside a word segment is not preserved
/// assert_eq!(pascal_case("lawId"), "Lawid");
/// ```
pub fn pascal_case(s: &str) -> String {
    s.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a string to camelCase: [`pascal_case`] with the first character
/// lower-cased.
///
/// ```
/// use lawgen_openapi::naming::camel_case;
///
/// assert_eq!(camel_case("law_num_era"), "lawNumEra");
/// assert_eq!(camel_case(""), "");
/// ```
pub fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a string to snake_case.
///
/// Inserts `_` before every ASCII upper-case character except the first one,
/// then lower-cases the whole string.
///
/// ```
/// use lawgen_openapi::naming::snake_case;
///
/// assert_eq!(snake_case("GetLawData"), "get_law_data");
/// assert_eq!(snake_case("HTTPCode"), "h_t_t_p_code");
/// ```
pub fn snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (idx, c) in s.char_indices() {
        if idx > 0 && c.is_ascii_uppercase() {
            result.push('_');
        }
        result.push(c);
    }
    result.to_lowercase()
}

/// Keeps ASCII alphanumerics and underscores, mapping anything else through
/// `replacement` (or dropping it when `None`).
fn sanitize(s: &str, replacement: Option<char>) -> String {
    s.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else {
                replacement
            }
        })
        .collect()
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Rust type name for an already PascalCased domain name.
///
/// ```
/// use lawgen_openapi::naming::type_name;
///
/// assert_eq!(type_name("LawInfo"), "LawInfo");
/// assert_eq!(type_name("Law.Info"), "LawInfo");
/// assert_eq!(type_name("2024Law"), "T2024Law");
/// ```
pub fn type_name(name: &str) -> String {
    let cleaned = sanitize(name, None);
    if cleaned.is_empty() {
        "Unnamed".to_string()
    } else if starts_with_digit(&cleaned) {
        format!("T{cleaned}")
    } else {
        cleaned
    }
}

/// Rust field or argument name for a wire name.
///
/// ```
/// use lawgen_openapi::naming::field_name;
///
/// assert_eq!(field_name("law_id"), "law_id");
/// assert_eq!(field_name("lawRevisionId"), "law_revision_id");
/// assert_eq!(field_name("file-type"), "file_type");
/// assert_eq!(field_name("3rd"), "_3rd");
/// ```
pub fn field_name(name: &str) -> String {
    let cleaned = sanitize(&snake_case(name), Some('_'));
    if cleaned.is_empty() {
        "field".to_string()
    } else if starts_with_digit(&cleaned) {
        format!("_{cleaned}")
    } else {
        cleaned
    }
}

/// SCREAMING_SNAKE_CASE constant name.
pub fn const_name(name: &str) -> String {
    field_name(name).to_uppercase()
}

/// Enum variant name for a literal enum value.
///
/// ```
/// use lawgen_openapi::naming::variant_name;
///
/// assert_eq!(variant_name("Heisei"), "Heisei");
/// assert_eq!(variant_name("law_num"), "LawNum");
/// assert_eq!(variant_name("001"), "V001");
/// assert_eq!(variant_name("明治"), "Value");
/// ```
pub fn variant_name(value: &str) -> String {
    let cleaned = sanitize(&pascal_case(value), None);
    if cleaned.is_empty() {
        "Value".to_string()
    } else if starts_with_digit(&cleaned) {
        format!("V{cleaned}")
    } else {
        cleaned
    }
}

/// Builds a `proc_macro2::Ident`, escaping keywords.
///
/// Input that is not a valid identifier is sanitized first, so this never
/// panics.
///
/// ```
/// use lawgen_openapi::naming::ident;
///
/// assert_eq!(ident("law_id").to_string(), "law_id");
/// assert_eq!(ident("type").to_string(), "r#type");
/// assert_eq!(ident("self").to_string(), "self_");
/// ```
pub fn ident(name: &str) -> Ident {
    let mut cleaned = sanitize(name, Some('_'));
    if cleaned.is_empty() {
        cleaned = "_unnamed".to_string();
    } else if starts_with_digit(&cleaned) {
        cleaned.insert(0, '_');
    }

    if RESERVED_PATH_KEYWORDS.contains(&cleaned.as_str()) {
        Ident::new(&format!("{cleaned}_"), Span::call_site())
    } else if RAW_KEYWORDS.contains(&cleaned.as_str()) {
        Ident::new_raw(&cleaned, Span::call_site())
    } else {
        Ident::new(&cleaned, Span::call_site())
    }
}
