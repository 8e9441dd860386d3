//! Canonical lookup keys and display identifiers for type names

/// Acronym segments rendered fully upper-cased in display names
const ACRONYMS: [&str; 4] = ["html", "id", "json", "url"];

/// Map a raw field or file-derived name to its canonical lookup key.
///
/// An explicit separator is inserted at every transition into an uppercase
/// rune and the result is lower-cased, so `IssueType`, `issueType` and
/// `issue_type` all normalize to `issue_type`. If the canonical form starts
/// with the canonical form of `scope` as a strict prefix, the prefix is
/// stripped so a type named after its own package does not stutter when
/// displayed.
pub fn normalize(raw: &str, scope: &str) -> String {
    let key = canonical(raw);
    let scope_key = canonical(scope);
    if !scope_key.is_empty() && key.len() > scope_key.len() && key.starts_with(&scope_key) {
        let stripped = key[scope_key.len()..].trim_start_matches('_');
        if !stripped.is_empty() {
            return stripped.to_string();
        }
    }
    key
}

fn canonical(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Produce the identifier-safe, capitalized display name for a canonical
/// key. Segments separated by normalization delimiters are title-cased
/// independently; segments that equal, start with or end with a recognized
/// acronym render it fully upper-cased. Names that would start with a digit
/// are prefixed with `N`.
///
/// Pure function of the key: `display(normalize(display(k), ""))` equals
/// `display(k)`.
pub fn display(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| match c {
            '.' | '-' | '\\' => '_',
            c => c,
        })
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    for segment in cleaned.split('_') {
        if segment.is_empty() {
            continue;
        }
        out.push_str(&cased_segment(segment));
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, 'N');
    }
    out
}

fn cased_segment(segment: &str) -> String {
    let lower = segment.to_lowercase();
    if ACRONYMS.contains(&lower.as_str()) {
        return segment.to_uppercase();
    }

    let mut part = segment.to_string();
    if segment.is_ascii() {
        for acronym in ACRONYMS {
            if lower.ends_with(acronym) && lower.len() > acronym.len() {
                let cut = part.len() - acronym.len();
                part = format!("{}{}", &part[..cut], acronym.to_uppercase());
            }
            if lower.starts_with(acronym) && lower.len() > acronym.len() {
                part = format!("{}{}", acronym.to_uppercase(), &part[acronym.len()..]);
            }
        }
    }
    title_case(&part)
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
