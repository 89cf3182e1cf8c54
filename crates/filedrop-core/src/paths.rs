//! Directory path stripping for storage locations.
//!
//! Both helpers strip at most one separator from each end they touch. They do
//! not collapse interior separators or resolve `.`/`..`: `//a//b//` keeps its
//! inner slashes.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn remove_last_separator(path: &str) -> &str {
    let path = path.trim();
    match path.chars().last() {
        Some(c) if is_separator(c) => &path[..path.len() - 1],
        _ => path,
    }
}

fn remove_first_separator(path: &str) -> &str {
    let path = path.trim();
    match path.chars().next() {
        Some(c) if is_separator(c) => &path[1..],
        _ => path,
    }
}

/// Strip surrounding whitespace and one trailing separator from a base directory.
pub fn to_base_path(path: &str) -> String {
    remove_last_separator(path).to_string()
}

/// Strip surrounding whitespace, one trailing and one leading separator from a
/// caller-supplied sub directory.
pub fn to_sub_path(path: &str) -> String {
    remove_first_separator(remove_last_separator(path)).to_string()
}

/// Join an already-stripped base and sub path the way storage directories are built.
pub fn join_storage_directory(base: &str, sub: &str) -> String {
    let base = to_base_path(base);
    let sub = to_sub_path(sub);
    if sub.is_empty() {
        base
    } else {
        format!("{}/{}", base, sub)
    }
}

/// True when any `/`- or `\`-separated segment is `..`.
pub fn has_parent_segment(path: &str) -> bool {
    path.split(is_separator).any(|segment| segment.trim() == "..")
}
