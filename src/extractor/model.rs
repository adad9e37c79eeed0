use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Tagged reference to page media, rendered into a fragment string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaFragment<'a> {
    Image { src: &'a str },
    Link { href: &'a str },
    Anchor { text: &'a str, href: &'a str },
}

impl Display for MediaFragment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image { src } => write!(f, "[IMAGE] {src}"),
            Self::Link { href } => write!(f, "[LINK] {href}"),
            Self::Anchor { text, href } if text.is_empty() => write!(f, "[ANCHOR] {href}"),
            Self::Anchor { text, href } => write!(f, "[ANCHOR] {text} → {href}"),
        }
    }
}

/// Deduplicated fragments of one page, kept in code-point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentSet {
    fragments: BTreeSet<String>,
}

impl FragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment. Empty strings are never stored; returns whether the set grew.
    pub fn insert(&mut self, fragment: impl Into<String>) -> bool {
        let fragment = fragment.into();
        if fragment.is_empty() {
            return false;
        }
        self.fragments.insert(fragment)
    }

    pub fn insert_media(&mut self, media: MediaFragment<'_>) -> bool {
        self.insert(media.to_string())
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.fragments.contains(fragment)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }
}

impl Extend<String> for FragmentSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for fragment in iter {
            self.insert(fragment);
        }
    }
}

/// Join the fragments in lexicographic order with `\n`.
pub fn canonicalize(fragments: &FragmentSet) -> String {
    fragments.iter().collect::<Vec<_>>().join("\n")
}
