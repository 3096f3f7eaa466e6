//! Identifier derivation.
//!
//! Turns a relative asset path such as `icons/arrow-left@2x.png` into a bare
//! identifier (`icons_arrowLeft_2x_png`) usable as a constant name in the
//! generated module.

/// Prefix added when a derived identifier would start with a digit.
pub const DIGIT_PREFIX: &str = "img";

/// Characters that separate words inside a token.
const WORD_SEPARATORS: [char; 4] = ['_', '.', '-', ' '];

/// Derive the canonical identifier for a relative asset path.
///
/// The path is split on `/` and `\`, each segment is split again on `.`, every
/// resulting token is camel-cased, and the non-empty tokens are joined with
/// `_`. Any `@` left over becomes `_`, leading underscores are dropped, and a
/// leading digit gets the [`DIGIT_PREFIX`].
///
/// A path with no word characters at all (`""`, `-/.`) yields an empty
/// identifier; the collector rejects those.
///
/// # Examples
///
/// ```
/// use assetmap_core::derive_identifier;
///
/// assert_eq!(derive_identifier("folder/foo_bar.png"), "folder_fooBar_png");
/// assert_eq!(derive_identifier("Foo@2x.png"), "foo_2x_png");
/// assert_eq!(derive_identifier("1foo-bar.png"), "img1fooBar_png");
/// ```
#[must_use]
pub fn derive_identifier(relative_path: &str) -> String {
    let joined = relative_path
        .split(['/', '\\'])
        .flat_map(|segment| segment.split('.'))
        .map(camel_case)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .replace('@', "_");
    let joined = joined.trim_start_matches('_');

    if joined.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{DIGIT_PREFIX}{joined}")
    } else {
        joined.to_string()
    }
}

/// Camel-case a single token.
///
/// `foo-bar`, `foo_bar`, `Foo Bar` and `FooBar` all become `fooBar`; acronyms
/// are treated as one word (`XMLHttp` becomes `xmlHttp`). Characters that are
/// neither letters, digits nor separators are kept as they are.
#[must_use]
pub fn camel_case(token: &str) -> String {
    let token = token.trim();
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return String::new(),
        (Some(only), None) if !WORD_SEPARATORS.contains(&only) => {
            return only.to_lowercase().collect();
        }
        _ => {}
    }

    if token
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return token.to_string();
    }

    let marked = if token.chars().any(char::is_uppercase) {
        mark_case_boundaries(token)
    } else {
        token.to_string()
    };

    let mut out = String::with_capacity(marked.len());
    let mut upper_next = false;
    let mut leading = true;
    for c in marked.chars() {
        if WORD_SEPARATORS.contains(&c) {
            if !leading {
                upper_next = true;
            }
            continue;
        }
        leading = false;
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Insert a `-` at every lower->upper transition and before the last capital
/// of an acronym that is followed by a lowercase letter.
fn mark_case_boundaries(token: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(token.len() + 4);
    let mut last_lower = false;
    let mut last_upper = false;
    let mut last_last_upper = false;

    for c in token.chars() {
        if last_lower && c.is_ascii_alphabetic() && c.is_uppercase() {
            out.push('-');
            out.push(c);
            last_lower = false;
            last_last_upper = last_upper;
            last_upper = true;
        } else if last_upper && last_last_upper && c.is_ascii_alphabetic() && c.is_lowercase() {
            let prev = out.pop();
            out.push('-');
            out.extend(prev);
            out.push(c);
            last_last_upper = last_upper;
            last_upper = false;
            last_lower = true;
        } else {
            out.push(c);
            last_lower = !c.is_uppercase();
            last_last_upper = last_upper;
            last_upper = !c.is_lowercase();
        }
    }

    out.into_iter().collect()
}
