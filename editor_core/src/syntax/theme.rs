//! Token classes and the stylesheet that colors them.

use std::collections::HashMap;
use std::fmt::Write;

/// Token style categories emitted by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStyle {
    /// Quoted string literals
    String,
    /// Line and block comments
    Comment,
    /// HTML element names
    Tag,
    /// HTML attribute names
    Attr,
    /// CSS property names
    Property,
    /// Language keywords
    Keyword,
    /// Integer literals
    Number,
    /// Identifiers at a call site
    Function,
}

impl TokenStyle {
    pub fn all() -> &'static [TokenStyle] {
        &[
            TokenStyle::String,
            TokenStyle::Comment,
            TokenStyle::Tag,
            TokenStyle::Attr,
            TokenStyle::Property,
            TokenStyle::Keyword,
            TokenStyle::Number,
            TokenStyle::Function,
        ]
    }

    /// CSS class carried by spans of this style.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::String => "token-string",
            Self::Comment => "token-comment",
            Self::Tag => "token-tag",
            Self::Attr => "token-attr",
            Self::Property => "token-property",
            Self::Keyword => "token-keyword",
            Self::Number => "token-number",
            Self::Function => "token-function",
        }
    }

    /// Wraps already escaped text in a span of this style.
    pub fn wrap(&self, escaped: &str) -> String {
        format!("<span class=\"{}\">{}</span>", self.css_class(), escaped)
    }
}

/// RGBA color represented as [r, g, b, a] with values 0.0-1.0.
pub type Color = [f32; 4];

/// A syntax highlighting theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Background color.
    pub background: Color,
    /// Default text color.
    pub foreground: Color,
    /// Colors for each token style.
    colors: HashMap<TokenStyle, Color>,
}

impl Theme {
    /// Creates a new theme with the given name and default colors.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            background: [0.102, 0.102, 0.122, 1.0], // #1A1A1F
            foreground: [0.902, 0.902, 0.902, 1.0], // #E6E6E6
            colors: HashMap::new(),
        }
    }

    /// Sets the color for a token style.
    pub fn set_color(&mut self, style: TokenStyle, color: Color) {
        self.colors.insert(style, color);
    }

    /// Gets the color for a token style, falling back to foreground.
    pub fn color(&self, style: TokenStyle) -> Color {
        self.colors.get(&style).copied().unwrap_or(self.foreground)
    }

    /// Creates the default dark theme (similar to One Dark).
    pub fn dark() -> Self {
        let mut theme = Self::new("Dark");

        theme.background = [0.102, 0.102, 0.122, 1.0]; // #1A1A1F
        theme.foreground = [0.682, 0.710, 0.749, 1.0]; // #ABB2BF

        theme.set_color(TokenStyle::Keyword, [0.769, 0.471, 0.839, 1.0]); // #C477D6
        theme.set_color(TokenStyle::String, [0.596, 0.765, 0.475, 1.0]); // #98C379
        theme.set_color(TokenStyle::Number, [0.824, 0.608, 0.467, 1.0]); // #D29B77
        theme.set_color(TokenStyle::Comment, [0.455, 0.506, 0.557, 1.0]); // #74818E
        theme.set_color(TokenStyle::Function, [0.380, 0.686, 0.937, 1.0]); // #61AFEF
        theme.set_color(TokenStyle::Tag, [0.878, 0.439, 0.439, 1.0]); // #E07070
        theme.set_color(TokenStyle::Attr, [0.890, 0.780, 0.478, 1.0]); // #E3C77A
        theme.set_color(TokenStyle::Property, [0.337, 0.714, 0.761, 1.0]); // #56B6C2

        theme
    }

    /// Creates a light theme.
    pub fn light() -> Self {
        let mut theme = Self::new("Light");

        theme.background = [0.980, 0.980, 0.980, 1.0]; // #FAFAFA
        theme.foreground = [0.220, 0.227, 0.259, 1.0]; // #383A42

        theme.set_color(TokenStyle::Keyword, [0.651, 0.149, 0.643, 1.0]); // #A626A4
        theme.set_color(TokenStyle::String, [0.314, 0.631, 0.310, 1.0]); // #50A14F
        theme.set_color(TokenStyle::Number, [0.596, 0.408, 0.004, 1.0]); // #986801
        theme.set_color(TokenStyle::Comment, [0.627, 0.631, 0.655, 1.0]); // #A0A1A7
        theme.set_color(TokenStyle::Function, [0.251, 0.471, 0.949, 1.0]); // #4078F2
        theme.set_color(TokenStyle::Tag, [0.894, 0.337, 0.286, 1.0]); // #E45649
        theme.set_color(TokenStyle::Attr, [0.757, 0.518, 0.004, 1.0]); // #C18401
        theme.set_color(TokenStyle::Property, [0.004, 0.518, 0.737, 1.0]); // #0184BC

        theme
    }

    /// Looks up a built-in theme by name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Renders CSS rules for the code block and every token class.
    pub fn stylesheet(&self) -> String {
        let mut css = format!(
            "pre.code {{ background: {}; color: {}; }}\n",
            css_color(self.background),
            css_color(self.foreground)
        );
        for style in TokenStyle::all() {
            let _ = writeln!(
                css,
                ".{} {{ color: {}; }}",
                style.css_class(),
                css_color(self.color(*style))
            );
        }
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Formats a color as `#RRGGBB`, or `rgba(...)` when translucent.
fn css_color(color: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let [r, g, b, a] = color;
    if a >= 1.0 {
        format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b))
    } else {
        format!("rgba({}, {}, {}, {:.2})", channel(r), channel(g), channel(b), a.max(0.0))
    }
}
