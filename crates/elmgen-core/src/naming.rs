//! Naming convention utilities for Elm code generation.
//!
//! Schema keys arrive in whatever convention the wire format uses (`snake_case`,
//! `dotted.keys`, `camelCase`). Elm wants lowerCamelCase for record fields and
//! functions, and PascalCase for types and modules.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `event_id` | [`to_camel_case`] | `eventId` |
//! | `m.relates_to` | [`to_camel_case`] | `mRelatesTo` |
//! | `type` | [`elm_field_name`] | `eventType` |
//! | `m.room.message` | [`record_display_name`] | `MRoomMessage` |
//! | `Point` | [`lower_first`] | `point` |

/// Elm keywords that cannot be used as record field names.
const ELM_RESERVED: &[&str] = &[
    "if", "then", "else", "case", "of", "let", "in", "type", "module", "where", "import",
    "exposing", "as", "port", "alias", "infix",
];

/// Split an identifier into lowercase words.
///
/// Words are separated by `_`, `.`, `-` and by a lowercase (or digit) to uppercase
/// transition. Empty words from consecutive separators are dropped.
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if matches!(c, '_' | '.' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }

        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Convert any supported key convention to lowerCamelCase.
///
/// # Examples
///
/// ```
/// use elmgen_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("event_id"), "eventId");
/// assert_eq!(to_camel_case("m.relates_to"), "mRelatesTo");
/// assert_eq!(to_camel_case("roomId"), "roomId");
/// ```
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.clone() } else { capitalize(word) })
        .collect()
}

/// Elm record field name for a schema key.
///
/// The key `type` maps to `eventType`; any other name that lands on an Elm keyword
/// gets a trailing underscore.
pub fn elm_field_name(key: &str) -> String {
    if key == "type" {
        return "eventType".to_string();
    }

    let name = to_camel_case(key);
    if ELM_RESERVED.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Display name of a record: dotted names join their capitalized segments.
///
/// # Examples
///
/// ```
/// use elmgen_core::naming::record_display_name;
///
/// assert_eq!(record_display_name("m.room.message"), "MRoomMessage");
/// assert_eq!(record_display_name("SyncResponse"), "SyncResponse");
/// ```
pub fn record_display_name(name: &str) -> String {
    if !name.contains('.') {
        return name.to_string();
    }
    name.split('.').map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Whether `s` is a capitalized Elm identifier (type, constructor or module segment).
pub fn is_type_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `s` is a lowercase Elm identifier (record field, function or binder).
pub fn is_value_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `s` is a dotted Elm module name such as `Internal.Tools.Timestamp`.
pub fn is_module_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_type_identifier)
}

/// Elm string literal for a JSON key.
pub fn elm_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Name of the n-th positional lambda argument in a decoder combinator.
pub fn positional_binder(index: usize) -> String {
    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    match LETTERS.get(index) {
        Some(letter) => char::from(*letter).to_string(),
        None => format!("v{index}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn to_camel_case___converts_snake_case() {
        assert_eq!(to_camel_case("hello_world"), "helloWorld");
        assert_eq!(to_camel_case("origin_server_ts"), "originServerTs");
    }

    #[test]
    fn to_camel_case___converts_dotted_keys() {
        assert_eq!(to_camel_case("m.relates_to"), "mRelatesTo");
        assert_eq!(to_camel_case("a.b.c"), "aBC");
    }

    #[test]
    fn to_camel_case___keeps_case_boundaries() {
        assert_eq!(to_camel_case("roomId"), "roomId");
        assert_eq!(to_camel_case("RoomVersion"), "roomVersion");
        assert_eq!(to_camel_case("v2Room"), "v2Room");
    }

    #[test]
    fn to_camel_case___lowercases_upper_runs() {
        assert_eq!(to_camel_case("URL"), "url");
        assert_eq!(to_camel_case("EVENT_ID"), "eventId");
    }

    #[test]
    fn to_camel_case___handles_consecutive_separators() {
        assert_eq!(to_camel_case("foo__bar"), "fooBar");
        assert_eq!(to_camel_case("_leading"), "leading");
        assert_eq!(to_camel_case("trailing_"), "trailing");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn elm_field_name___renames_type() {
        assert_eq!(elm_field_name("type"), "eventType");
    }

    #[test]
    fn elm_field_name___suffixes_other_keywords() {
        assert_eq!(elm_field_name("alias"), "alias_");
        assert_eq!(elm_field_name("port"), "port_");
        assert_eq!(elm_field_name("Type"), "type_");
    }

    #[test]
    fn elm_field_name___leaves_ordinary_names() {
        assert_eq!(elm_field_name("sender"), "sender");
        assert_eq!(elm_field_name("state_key"), "stateKey");
    }

    #[test]
    fn record_display_name___joins_dotted_segments() {
        assert_eq!(record_display_name("m.room.message"), "MRoomMessage");
        assert_eq!(record_display_name("Sync.timeline"), "SyncTimeline");
    }

    #[test]
    fn lower_first___lowercases_first_letter_only() {
        assert_eq!(lower_first("SyncResponse"), "syncResponse");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn is_value_identifier___requires_leading_lowercase_letter() {
        assert!(is_value_identifier("eventId"));
        assert!(is_value_identifier("alias_"));
        assert!(is_value_identifier("v2"));
        assert!(!is_value_identifier(""));
        assert!(!is_value_identifier("2fa"));
        assert!(!is_value_identifier("EventId"));
        assert!(!is_value_identifier("a-b"));
    }

    #[test]
    fn is_module_name___accepts_dotted_pascal_segments() {
        assert!(is_module_name("Internal.Tools.DecodeExtra"));
        assert!(is_module_name("Json"));
        assert!(!is_module_name("internal.Tools"));
        assert!(!is_module_name("Internal..Tools"));
        assert!(!is_module_name(""));
    }

    #[test]
    fn elm_string___escapes_quotes_and_backslashes() {
        assert_eq!(elm_string("m.relates_to"), "\"m.relates_to\"");
        assert_eq!(elm_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn positional_binder___uses_letters_then_indexed_names() {
        assert_eq!(positional_binder(0), "a");
        assert_eq!(positional_binder(25), "z");
        assert_eq!(positional_binder(26), "v26");
    }
}
