//! Slug derivation for project titles.
//!
//! Follows the studio's default generator for Latin-script titles: accented
//! letters fold to their ASCII base, everything else outside `[a-z0-9_-]`
//! is dropped. Scripts the fold table does not cover produce shorter slugs
//! than the studio would.

/// Maximum slug length for project documents.
pub const PROJECT_SLUG_MAX_LEN: usize = 96;

/// Convert a title into a URL-safe slug of at most `max_len` characters.
///
/// Lower-cases the input, folds Latin diacritics (`é` to `e`, `ß` to `ss`),
/// turns whitespace runs into `-`, drops anything that is not an ASCII
/// letter, digit, `-` or `_`, collapses repeated `-` and strips
/// leading/trailing `-`.
///
/// # Examples
///
/// ```
/// use reel_core::slug::slugify;
///
/// assert_eq!(slugify("Night Swim", 96), "night-swim");
/// assert_eq!(slugify("  Acme — Spring '24 ", 96), "acme-spring-24");
/// assert_eq!(slugify("Café Noir", 96), "cafe-noir");
/// assert_eq!(slugify("Long Title", 4), "long");
/// ```
pub fn slugify(input: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(input.len());

    for c in input.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if let Some(folded) = fold_latin(c) {
            slug.push_str(folded);
        }
    }

    // Only ASCII survives the filter above, so byte truncation is safe.
    slug.truncate(max_len);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// ASCII spelling of a lower-case Latin letter with diacritics.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ß' => "ss",
        'ś' | 'š' | 'ş' => "s",
        'ť' | 'ţ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Slug for a project title using the project length limit.
pub fn project_slug(title: &str) -> String {
    slugify(title, PROJECT_SLUG_MAX_LEN)
}
