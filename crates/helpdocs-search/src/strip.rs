//! Plain-text excerpts from rendered HTML.

use std::sync::LazyLock;

use regex::Regex;

/// Elements dropped together with their content.
const DROPPED: [&str; 5] = ["script", "style", "pre", "code", "figure"];

/// Elements replaced by their content, padded with spaces.
const UNWRAPPED: [&str; 14] = [
    "dd", "a", "h1", "h2", "h3", "h4", "h5", "h6", "p", "small", "b", "i", "blockquote", "li",
];

static DROPPED_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DROPPED
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}>")).unwrap())
        .collect()
});

static UNWRAPPED_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    UNWRAPPED
        .iter()
        .map(|tag| Regex::new(&format!(r"(?i)<{tag}(?: [^>]*?)?>(.*?)</{tag}>")).unwrap())
        .collect()
});

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(?:img|hr|br)\b[^>]*>").unwrap());
static LIST_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:dt|a|ul|ol)(?: [^>]+)?>").unwrap());
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+?>").unwrap());
static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());
static APOSTROPHE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:#8217|rsquo|#39);").unwrap());
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&[^\s;&]*;").unwrap());
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)[^a-z0-9,"'?.! \t\r\n]"#).unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduce HTML to a whitespace-normalized plain-text excerpt.
///
/// Code, scripts, styles and figures are dropped with their content;
/// structural tags become word breaks; footnote markers like `[2]` are
/// removed; apostrophe and quote entities become `'` and `"`, other entities
/// become spaces. Only letters, digits, spaces and `,"'?.!` survive.
///
/// # Example
///
/// ```
/// use helpdocs_search::strip_html;
///
/// assert_eq!(strip_html("<p>Hello <b>world</b>!</p>"), "Hello world !");
/// ```
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut text = html.to_owned();
    for re in DROPPED_RES.iter() {
        text = re.replace_all(&text, "").into_owned();
    }
    text = COMMENT_RE.replace_all(&text, "").into_owned();
    text = BREAK_RE.replace_all(&text, " ").into_owned();
    for re in UNWRAPPED_RES.iter() {
        text = re.replace_all(&text, " $1 ").into_owned();
    }
    text = LIST_TAG_RE.replace_all(&text, " ").into_owned();
    text = ANY_TAG_RE.replace_all(&text, "").into_owned();
    text = FOOTNOTE_RE.replace_all(&text, "").into_owned();
    text = APOSTROPHE_RE.replace_all(&text, "'").into_owned();
    text = text.replace("&quot;", "\"");
    text = ENTITY_RE.replace_all(&text, " ").into_owned();
    text = text.replace(';', " ");
    text = DISALLOWED_RE.replace_all(&text, "").into_owned();
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}
