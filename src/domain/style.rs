//! Line-drawing glyph sets, selectable by name.

use std::fmt;

use itertools::Itertools;
use tracing::debug;

/// The four glyphs that draw a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Connector in front of a child that has later siblings
    pub branch: &'static str,
    /// Connector in front of the last child
    pub end: &'static str,
    /// Continuation under an ancestor that has later siblings
    pub pipe: &'static str,
    /// Continuation under an ancestor that was the last child
    pub empty: &'static str,
}

pub const THIN: Style = Style {
    branch: "├── ",
    end: "└── ",
    pipe: "│   ",
    empty: "    ",
};

pub const THICK: Style = Style {
    branch: "┣━━ ",
    end: "┗━━ ",
    pipe: "┃   ",
    empty: "    ",
};

pub const DOUBLE: Style = Style {
    branch: "╠══ ",
    end: "╚══ ",
    pipe: "║   ",
    empty: "    ",
};

pub const ASCII: Style = Style {
    branch: "|-- ",
    end: "`-- ",
    pipe: "|   ",
    empty: "    ",
};

/// Registered style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleName {
    Thin,
    #[default]
    Thick,
    Double,
    Ascii,
}

impl StyleName {
    pub const ALL: [StyleName; 4] = [
        StyleName::Thin,
        StyleName::Thick,
        StyleName::Double,
        StyleName::Ascii,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Thin => "thin",
            StyleName::Thick => "thick",
            StyleName::Double => "double",
            StyleName::Ascii => "ascii",
        }
    }

    pub fn style(self) -> Style {
        match self {
            StyleName::Thin => THIN,
            StyleName::Thick => THICK,
            StyleName::Double => DOUBLE,
            StyleName::Ascii => ASCII,
        }
    }

    /// Registered names, comma separated.
    pub fn names() -> String {
        Self::ALL.iter().join(", ")
    }

    /// Strict lookup, case-insensitive. `None` for unregistered names.
    pub fn parse(name: &str) -> Option<StyleName> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
    }

    /// Lenient lookup: unregistered names resolve to the default style.
    pub fn lookup(name: &str) -> StyleName {
        Self::parse(name).unwrap_or_else(|| {
            let fallback = StyleName::default();
            debug!("unknown style {:?}, using {}", name, fallback);
            fallback
        })
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glyphs for `name`, falling back to the default style.
pub fn style(name: &str) -> Style {
    StyleName::lookup(name).style()
}
