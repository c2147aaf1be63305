//! Slug normalization shared by file naming, provider lookup, symbol keys, and catalog matching.
//!
//! Output is strict: ASCII lowercase alphanumerics joined by the separator. A handful of
//! symbols are spelled out and common accented Latin letters fold to ASCII first.

/// Separator used in file names and `serverId` fallbacks.
pub const DASH: &str = "-";
/// No separator: provider ids, `gameKey` fallbacks, symbol keys, catalog comparison.
pub const NONE: &str = "";

/// Slugify `input`, joining words with `separator`.
///
/// `slugify("Book of Ra", "-")` is `"book-of-ra"`, `slugify("Play'n GO", "")` is `"playngo"`.
pub fn slugify(input: &str, separator: &str) -> String {
    let mut spaced = String::with_capacity(input.len());
    for c in input.chars() {
        if separator.chars().eq(std::iter::once(c)) {
            spaced.push(' ');
            continue;
        }
        match substitute(c) {
            Some(s) => spaced.push_str(s),
            None if c.is_ascii_alphanumeric() || c.is_whitespace() => spaced.push(c),
            None => {}
        }
    }
    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(separator)
        .to_ascii_lowercase()
}

/// Compare two names by their separator-less slugs.
pub fn same_slug(a: &str, b: &str) -> bool {
    slugify(a, NONE) == slugify(b, NONE)
}

fn substitute(c: char) -> Option<&'static str> {
    let s = match c {
        '&' => "and",
        '|' => "or",
        '<' => "less",
        '>' => "greater",
        '$' => "dollar",
        '%' => "percent",
        '€' => "euro",
        '£' => "pound",
        '¢' => "cent",
        '¥' => "yen",
        '©' => "c",
        '®' => "r",
        '™' => "tm",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'ç' | 'ć' | 'č' => "c",
        'Ç' | 'Ć' | 'Č' => "C",
        'ď' | 'đ' | 'ð' => "d",
        'Ď' | 'Đ' | 'Ð' => "D",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ę' | 'Ě' => "E",
        'ğ' => "g",
        'Ğ' => "G",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'İ' => "I",
        'ł' | 'ľ' => "l",
        'Ł' | 'Ľ' => "L",
        'ñ' | 'ń' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => "O",
        'ř' => "r",
        'Ř' => "R",
        'ś' | 'š' | 'ş' => "s",
        'Ś' | 'Š' | 'Ş' => "S",
        'ť' | 'ţ' => "t",
        'Ť' | 'Ţ' => "T",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        _ => return None,
    };
    Some(s)
}
