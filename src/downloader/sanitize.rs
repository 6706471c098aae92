// Filename sanitizer for titles reported by yt-dlp

use regex::Regex;

/// Character substituted for every illegal character
pub const PLACEHOLDER: char = '_';

lazy_static::lazy_static! {
    // Reserved on Windows / FAT, control characters, plus `!`
    static ref ILLEGAL_RE: Regex = Regex::new(r#"[<>:"/\\|?*!\x00-\x1F]"#).unwrap();
}

/// Replace each character that is illegal in a path component with `_`.
///
/// One placeholder per illegal character, runs are not collapsed, so the
/// output has the same number of characters as the input.
pub fn sanitize(raw: &str) -> String {
    ILLEGAL_RE
        .replace_all(raw, PLACEHOLDER.to_string().as_str())
        .into_owned()
}

/// Whether `c` would be replaced by [`sanitize`]
pub fn is_illegal(c: char) -> bool {
    let mut buf = [0u8; 4];
    ILLEGAL_RE.is_match(c.encode_utf8(&mut buf))
}
