//! Canonical function names from demangled symbols
//!
//! Symbols come in several shapes depending on the mangling scheme and the
//! kind of item:
//!
//! - `app::handlers::load::h0123456789abcdef`
//! - `app::Server::handle`
//! - `<app::Server as app::Handler>::handle`
//! - `<app::Holder<T>>::get`
//! - `app::load::<u32>`
//! - `app::run::{{closure}}` / `app::run::{closure#0}`
//!
//! They are reduced to the item name with its `Type::` prefix when the item is
//! a method, followed by `()`. Generic arguments are dropped: legacy symbols
//! never carry them, so keeping them from v0 symbols would make the same call
//! site render differently depending on the mangling scheme. The examples
//! above become `load()`, `Server::handle()`, `Server::handle()`,
//! `Holder::get()`, `load()` and `run::{{closure}}()`.

use super::UNKNOWN_FUNCTION;

const CLOSURE: &str = "{{closure}}";

#[derive(Debug, PartialEq, Eq)]
enum Kind {
    Item,
    Type,
    Closure,
}

/// Normalize a demangled symbol name
pub(crate) fn canonical_function_name(raw: &str) -> String {
    let mut segments: Vec<(String, Kind)> = Vec::new();

    for segment in split_path(strip_hash(raw.trim())) {
        if segment.is_empty() {
            continue;
        }
        if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            // a turbofish `name::<T>` on the preceding item is dropped, only a
            // leading `<Type as Trait>` or `<Type>` names the self type
            if segments.is_empty() {
                segments.push((self_type_name(inner), Kind::Type));
            }
        } else if segment.starts_with('{') {
            let marker = if segment.contains("closure") {
                CLOSURE.to_string()
            } else {
                segment.to_string()
            };
            segments.push((marker, Kind::Closure));
        } else {
            let kind = if segment.starts_with(|c: char| c.is_ascii_uppercase()) {
                Kind::Type
            } else {
                Kind::Item
            };
            segments.push((erase_generics(segment), kind));
        }
    }

    let Some(item) = segments.iter().rposition(|(_, kind)| *kind != Kind::Closure) else {
        return UNKNOWN_FUNCTION.to_string();
    };

    let mut name = String::new();
    if item > 0 && segments[item - 1].1 == Kind::Type {
        name.push_str(&segments[item - 1].0);
        name.push_str("::");
    }
    name.push_str(&segments[item].0);
    for (marker, _) in &segments[item + 1..] {
        name.push_str("::");
        name.push_str(marker);
    }
    name.push_str("()");
    name
}

fn strip_hash(name: &str) -> &str {
    match name.rsplit_once("::") {
        Some((head, tail)) if is_hash(tail) => head,
        _ => name,
    }
}

fn is_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Split on `::` outside of generic brackets
fn split_path(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` inside fn pointer types
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

/// Last path segment of the self type in `Type as Trait`
fn self_type_name(qualified: &str) -> String {
    let self_type = top_level_as(qualified).map_or(qualified, |at| &qualified[..at]);
    let self_type = self_type
        .trim()
        .trim_start_matches(['&', '*'])
        .trim_start_matches("mut ")
        .trim_start_matches("const ")
        .trim();
    let last = split_path(self_type).pop().unwrap_or(self_type);
    erase_generics(last)
}

fn top_level_as(qualified: &str) -> Option<usize> {
    let bytes = qualified.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && qualified[i..].starts_with(" as ") => return Some(i),
            _ => {}
        }
    }
    None
}

fn erase_generics(segment: &str) -> String {
    match segment.find('<') {
        Some(at) if at > 0 => segment[..at].to_string(),
        _ => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_free_function_drops_module_path() {
        assert_eq!(
            canonical_function_name("app::handlers::load::h0123456789abcdef"),
            "load()"
        );
        assert_eq!(canonical_function_name("app::handlers::load"), "load()");
    }

    #[test]
    fn test_method_keeps_type_prefix() {
        assert_eq!(canonical_function_name("app::Server::handle"), "Server::handle()");
        assert_eq!(
            canonical_function_name("<app::Server as app::Handler>::handle"),
            "Server::handle()"
        );
        assert_eq!(
            canonical_function_name("<&mut app::Server as core::fmt::Debug>::fmt"),
            "Server::fmt()"
        );
    }

    #[test]
    fn test_generics_are_normalized() {
        assert_eq!(canonical_function_name("app::load::<u32>"), "load()");
        assert_eq!(
            canonical_function_name("<app::Holder<alloc::string::String>>::get"),
            "Holder::get()"
        );
        assert_eq!(
            canonical_function_name("app::Holder<fn() -> u8>::get"),
            "Holder::get()"
        );
    }

    #[test]
    fn test_generics_render_the_same_under_both_manglings() {
        assert_eq!(
            canonical_function_name("app::generic_site::h0123456789abcdef"),
            canonical_function_name("app::generic_site::<&str>")
        );
        assert_eq!(
            canonical_function_name("app::Holder::get"),
            canonical_function_name("<app::Holder<u8>>::get::<i32>")
        );
    }

    #[test]
    fn test_closures_keep_enclosing_function() {
        assert_eq!(canonical_function_name("app::run::{{closure}}"), "run::{{closure}}()");
        assert_eq!(canonical_function_name("app::run::{closure#0}"), "run::{{closure}}()");
        assert_eq!(
            canonical_function_name("app::Server::run::{{closure}}::{{closure}}"),
            "Server::run::{{closure}}::{{closure}}()"
        );
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(canonical_function_name(""), UNKNOWN_FUNCTION);
        assert_eq!(canonical_function_name("{{closure}}"), UNKNOWN_FUNCTION);
        assert_eq!(canonical_function_name("main"), "main()");
    }

    proptest! {
        #[test]
        fn test_hash_suffix_never_leaks(
            module in "[a-z][a-z0-9_]{0,10}",
            function in "[a-z][a-z0-9_]{0,10}",
            hash in "[0-9a-f]{16}",
        ) {
            let raw = format!("{module}::{function}::h{hash}");
            prop_assert_eq!(canonical_function_name(&raw), format!("{function}()"));
        }
    }
}
