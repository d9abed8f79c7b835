//! Link rewriting for the compiled print document.
//!
//! All pages end up in one markdown document, so inline links become
//! reference links whose names are unique across the whole compilation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

static REF_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ {0,3}\[([^\]]+)\]: (\S+)( .*)?$\n?").unwrap());

static INLINE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\]\(([^)]+)\)").unwrap());

static LOCAL_FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(([^)#\s]*)(#[^)\s]+)\)").unwrap());

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://([^/:?#]+)").unwrap());

static TRAILING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)(\d+)$").unwrap());

/// Link names and targets already used by earlier pages of one compilation.
///
/// A target seen before reuses its name, so a page linking to it does not get
/// a second definition.
#[derive(Debug, Default)]
pub struct CompilationContext {
    names: HashSet<String>,
    targets: HashMap<String, String>,
}

impl CompilationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct link targets defined so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Rewrite one page's links as uniquely named reference links.
    ///
    /// Existing reference definitions are renamed on collision, inline links
    /// (except fragment-only ones) become `[text][name]`, and the page's new
    /// definitions are appended sorted by name.
    ///
    /// # Example
    ///
    /// ```
    /// use helpdocs_build::CompilationContext;
    ///
    /// let mut context = CompilationContext::new();
    /// let page = context.convert_links("See [the site](https://www.example.com/).");
    /// assert_eq!(page, "See [the site][example].\n\n[example]: https://www.example.com/\n");
    /// ```
    pub fn convert_links(&mut self, text: &str) -> String {
        let mut definitions = BTreeMap::new();
        let mut renames = Vec::new();

        for caps in REF_DEF_RE.captures_iter(text) {
            let label = &caps[1];
            let target = &caps[2];
            let tail = caps.get(3).map_or("", |m| m.as_str());
            let name = match self.targets.get(target) {
                Some(name) => name.clone(),
                None => {
                    let name = self.unique_name(label);
                    self.targets.insert(target.to_owned(), name.clone());
                    definitions.insert(name.clone(), format!("{target}{tail}"));
                    name
                }
            };
            if name != label {
                renames.push((label.to_owned(), name));
            }
        }

        let mut body = REF_DEF_RE.replace_all(text, "").into_owned();

        for (label, name) in &renames {
            body = rename_reference(&body, label, name);
        }

        let mut inline = Vec::new();
        for caps in INLINE_LINK_RE.captures_iter(&body) {
            let url = &caps[1];
            if url.starts_with('#') || inline.iter().any(|(seen, _)| seen == url) {
                continue;
            }
            let name = match self.targets.get(url) {
                Some(name) => name.clone(),
                None => {
                    let name = self.unique_name(&link_name(url));
                    self.targets.insert(url.to_owned(), name.clone());
                    definitions.insert(name.clone(), url.to_owned());
                    name
                }
            };
            inline.push((url.to_owned(), name));
        }

        for (url, name) in &inline {
            body = body.replace(&format!("]({url})"), &format!("][{name}]"));
        }

        if definitions.is_empty() {
            return body;
        }

        let refs = definitions
            .iter()
            .map(|(name, target)| format!("[{name}]: {target}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{refs}\n", body.trim_end())
    }

    /// Claim a name not used before in this compilation.
    ///
    /// A name ending in a number counts up; any other name gets ` 2`.
    fn unique_name(&mut self, base: &str) -> String {
        let mut name = base.to_owned();
        while self.names.contains(&name) {
            name = match TRAILING_NUMBER_RE.captures(&name) {
                Some(caps) => {
                    let next = caps[2].parse::<u64>().map_or(2, |n| n.saturating_add(1));
                    format!("{}{next}", &caps[1])
                }
                None => format!("{name} 2"),
            };
        }
        self.names.insert(name.clone());
        name
    }
}

/// Point `[label]` references at `name`.
///
/// Full references `][label]` are renamed in place; shortcut references
/// `[label]` keep their text and gain an explicit `[name]`.
fn rename_reference(text: &str, label: &str, name: &str) -> String {
    let Ok(re) = Regex::new(&format!(r"(\]?)\[{}\]", regex::escape(label))) else {
        return text.to_owned();
    };
    re.replace_all(text, |caps: &Captures<'_>| {
        let Some(whole) = caps.get(0) else {
            return String::new();
        };
        let followed_by_link = text[whole.end()..].starts_with(['[', '(']);
        if !caps[1].is_empty() {
            format!("][{name}]")
        } else if followed_by_link {
            whole.as_str().to_owned()
        } else {
            format!("[{label}][{name}]")
        }
    })
    .into_owned()
}

/// Base name for a link target.
///
/// Web links are named after their domain (`www.example.com` → `example`),
/// relative paths after the file stem, anything else is `Unknown`.
#[must_use]
pub fn link_name(url: &str) -> String {
    let target = url.split_whitespace().next().unwrap_or_default();

    if target.starts_with("http") {
        if let Some(caps) = DOMAIN_RE.captures(target) {
            let parts: Vec<&str> = caps[1].split('.').collect();
            let name = if parts.len() <= 2 { parts[0] } else { parts[1] };
            return name.to_owned();
        }
    } else if !target.starts_with(['/', '~']) {
        let file = target.rsplit('/').next().unwrap_or(target);
        let stem = file.split('.').next().unwrap_or(file);
        if !stem.is_empty() {
            return stem.to_owned();
        }
    }

    "Unknown".to_owned()
}

/// Reduce local links that carry a fragment to the bare fragment.
///
/// Headings are unique across the compiled document, so `page.html#setup`
/// resolves as `#setup` once every page is in one file.
///
/// # Example
///
/// ```
/// use helpdocs_build::fix_local_links;
///
/// assert_eq!(
///     fix_local_links("[Setup](sync.html#setup) and [docs](https://x.org/a#b)"),
///     "[Setup](#setup) and [docs](https://x.org/a#b)"
/// );
/// ```
#[must_use]
pub fn fix_local_links(text: &str) -> String {
    LOCAL_FRAGMENT_RE
        .replace_all(text, |caps: &Captures<'_>| {
            if caps[1].starts_with("http") {
                caps[0].to_owned()
            } else {
                format!("]({})", &caps[2])
            }
        })
        .into_owned()
}
