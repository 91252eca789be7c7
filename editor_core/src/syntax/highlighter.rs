//! Layered regex highlighter producing HTML markup.
//!
//! Source text goes through a fixed sequence of passes:
//!
//! 1. HTML escaping of `&`, `<` and `>`.
//! 2. String literals.
//! 3. Comments, per language.
//! 4. Structure: tags and attributes for HTML, property names for CSS,
//!    keywords, numbers and call sites for everything else.
//! 5. Placeholder expansion.
//!
//! Every span a pass classifies is replaced by an opaque placeholder, so
//! later passes cannot match inside it. Placeholders are built from Unicode
//! noncharacters, which escaping removes from the input, and contain no word
//! characters or digits.

use super::language::Language;
use super::theme::TokenStyle;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

const PLACEHOLDER_OPEN: char = '\u{FDD0}';
const PLACEHOLDER_CLOSE: char = '\u{FDD1}';
/// Noncharacters standing in for the digits 0-9 of a placeholder index.
const PLACEHOLDER_DIGIT_BASE: u32 = 0xFDE0;

static STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:\\.|[^"\\\n])*"|'(?:\\.|[^'\\\n])*'"#).expect("valid string regex")
});
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)//.*$").expect("valid line comment regex"));
static HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)#.*$").expect("valid hash comment regex"));
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)&lt;!--.*?--&gt;").expect("valid html comment regex"));
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(&lt;/?)([a-zA-Z0-9-]+)(.*?)(/?&gt;)").expect("valid html tag regex")
});
static HTML_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s)([a-zA-Z0-9-]+)=").expect("valid html attribute regex"));
static CSS_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z-]+):").expect("valid css property regex"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("valid number regex"));
static FUNCTION_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-zA-Z0-9_]+)\(").expect("valid function call regex"));

/// Whole-word keyword matchers, one per language with a keyword set.
static KEYWORDS: LazyLock<HashMap<Language, Regex>> = LazyLock::new(|| {
    Language::all()
        .iter()
        .filter(|lang| !lang.keywords().is_empty())
        .map(|&lang| {
            let words: Vec<String> = lang.keywords().iter().map(|kw| regex::escape(kw)).collect();
            let pattern = format!(r"\b(?:{})\b", words.join("|"));
            (lang, Regex::new(&pattern).expect("valid keyword regex"))
        })
        .collect()
});

/// Highlights `source` as `language`, returning HTML markup.
///
/// Never fails. Unbalanced input such as an unterminated string is styled on
/// a best-effort basis.
pub fn highlight(source: &str, language: Language) -> String {
    let mut stash = Placeholders::default();
    let text = escape_html(source);
    let text = stash.replace(&STRING, &text, TokenStyle::String);

    let text = match language {
        Language::Html => {
            let text = stash.replace(&HTML_COMMENT, &text, TokenStyle::Comment);
            style_html_tags(&text, &mut stash)
        }
        Language::Css => {
            let text = stash.replace(&BLOCK_COMMENT, &text, TokenStyle::Comment);
            style_css_properties(&text, &mut stash)
        }
        _ => {
            let mut text = stash.replace(&BLOCK_COMMENT, &text, TokenStyle::Comment);
            text = stash.replace(&LINE_COMMENT, &text, TokenStyle::Comment);
            if language.has_hash_comments() {
                text = stash.replace(&HASH_COMMENT, &text, TokenStyle::Comment);
            }
            style_code(&text, language, &mut stash)
        }
    };

    stash.expand(&text)
}

/// Escapes `&`, `<` and `>` in a single pass, so no entity is escaped twice.
///
/// Noncharacters in the placeholder range become U+FFFD so they can never be
/// confused with a placeholder.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{FDD0}'..='\u{FDEF}' => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(ch),
        }
    }
    out
}

fn style_html_tags(text: &str, stash: &mut Placeholders) -> String {
    HTML_TAG
        .replace_all(text, |caps: &Captures<'_>| {
            let tag = stash.push(TokenStyle::Tag.wrap(&caps[2]));
            let attrs = HTML_ATTR.replace_all(&caps[3], |attr: &Captures<'_>| {
                format!("{}{}=", &attr[1], stash.push(TokenStyle::Attr.wrap(&attr[2])))
            });
            format!("{}{}{}{}", &caps[1], tag, attrs, &caps[4])
        })
        .into_owned()
}

fn style_css_properties(text: &str, stash: &mut Placeholders) -> String {
    CSS_PROPERTY
        .replace_all(text, |caps: &Captures<'_>| {
            format!("{}:", stash.push(TokenStyle::Property.wrap(&caps[1])))
        })
        .into_owned()
}

/// Keywords, then numbers, then call sites. A keyword directly followed by
/// `(` is already a placeholder when the call-site pass runs.
fn style_code(text: &str, language: Language, stash: &mut Placeholders) -> String {
    let mut text = text.to_string();
    if let Some(keywords) = KEYWORDS.get(&language) {
        text = stash.replace(keywords, &text, TokenStyle::Keyword);
    }
    text = stash.replace(&NUMBER, &text, TokenStyle::Number);
    FUNCTION_CALL
        .replace_all(&text, |caps: &Captures<'_>| {
            format!("{}(", stash.push(TokenStyle::Function.wrap(&caps[1])))
        })
        .into_owned()
}

/// Styled spans set aside while later passes run.
#[derive(Debug, Default)]
struct Placeholders {
    spans: Vec<String>,
}

impl Placeholders {
    /// Stores a styled span and returns the placeholder standing in for it.
    fn push(&mut self, styled: String) -> String {
        let index = self.spans.len();
        self.spans.push(styled);

        let mut marker = String::new();
        marker.push(PLACEHOLDER_OPEN);
        for digit in index.to_string().bytes() {
            let offset = u32::from(digit - b'0');
            if let Some(ch) = char::from_u32(PLACEHOLDER_DIGIT_BASE + offset) {
                marker.push(ch);
            }
        }
        marker.push(PLACEHOLDER_CLOSE);
        marker
    }

    /// Replaces every match of `regex` with a placeholder for the wrapped match.
    fn replace(&mut self, regex: &Regex, text: &str, style: TokenStyle) -> String {
        regex
            .replace_all(text, |caps: &Captures<'_>| self.push(style.wrap(&caps[0])))
            .into_owned()
    }

    /// Substitutes every placeholder with its span, including placeholders
    /// captured inside other spans.
    fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.spans.iter().map(String::len).sum::<usize>());
        self.expand_into(text, self.spans.len(), &mut out);
        out
    }

    /// A span can only contain placeholders created before it, so nested
    /// expansion is limited to indices below `limit`.
    fn expand_into(&self, text: &str, limit: usize, out: &mut String) {
        let mut chars = text.char_indices();
        while let Some((start, ch)) = chars.next() {
            if ch != PLACEHOLDER_OPEN {
                out.push(ch);
                continue;
            }

            let mut index = 0usize;
            let mut closed = false;
            let mut end = text.len();
            for (pos, ch) in chars.by_ref() {
                if ch == PLACEHOLDER_CLOSE {
                    closed = true;
                    end = pos + ch.len_utf8();
                    break;
                }
                let digit = (ch as u32).wrapping_sub(PLACEHOLDER_DIGIT_BASE);
                if digit > 9 {
                    end = pos + ch.len_utf8();
                    break;
                }
                index = index.saturating_mul(10).saturating_add(digit as usize);
            }

            match self.spans.get(index) {
                Some(span) if closed && index < limit => self.expand_into(span, index, out),
                _ => out.push_str(&text[start..end]),
            }
        }
    }
}

/// Memoized highlight of one (content, language) pair.
///
/// Looking up different content or a different language re-renders and
/// replaces the entry.
#[derive(Debug, Default)]
pub struct HighlightCache {
    key: Option<(String, Language)>,
    rendered: String,
    renders: usize,
}

impl HighlightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the markup for `content`, rendering only on a key change.
    pub fn get(&mut self, content: &str, language: Language) -> &str {
        let hit = matches!(&self.key, Some((c, l)) if c == content && *l == language);
        if !hit {
            log::debug!("Highlight cache miss ({} bytes, {})", content.len(), language.tag());
            self.rendered = highlight(content, language);
            self.key = Some((content.to_string(), language));
            self.renders += 1;
        }
        &self.rendered
    }

    /// Drops the cached entry.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.rendered.clear();
    }

    /// Number of renders performed so far.
    pub fn renders(&self) -> usize {
        self.renders
    }
}
