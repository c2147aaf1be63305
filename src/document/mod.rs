//! Game write-up document: loading, blank-node cleanup, and section segmentation.
//!
//! The write-up is one flat run of body elements. Sections are located by fixed anchors
//! (the first `<p>`, the `<h1>`, the n-th `<h2>`, the first `<ul>`) and collected by walking
//! element siblings forward from each anchor; see [LAYOUT].

mod render;

pub use render::{inner_markup, text_content};

use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from reading the write-up file.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Named content section of a game write-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Meta,
    Intro,
    Expect,
    Characteristics,
    Played,
    Odds,
    Symbols,
    Test,
    Advantages,
    Play,
}

impl Group {
    pub fn name(self) -> &'static str {
        match self {
            Group::Meta => "meta",
            Group::Intro => "intro",
            Group::Expect => "expect",
            Group::Characteristics => "characteristics",
            Group::Played => "played",
            Group::Odds => "odds",
            Group::Symbols => "symbols",
            Group::Test => "test",
            Group::Advantages => "advantages",
            Group::Play => "play",
        }
    }
}

/// Which elements around an anchor belong to its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collect {
    /// The anchor itself and following siblings, up to the first `<tag>`.
    FromUntil(&'static str),
    /// Following siblings of the anchor, up to the first `<tag>`.
    Until(&'static str),
    /// Only the anchor element.
    Anchor,
    /// Every following sibling of the anchor.
    All,
}

/// One row of the section layout: `group` starts at the `ordinal`-th `<anchor>` in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRule {
    pub group: Group,
    pub anchor: &'static str,
    pub ordinal: usize,
    pub collect: Collect,
}

const fn rule(group: Group, anchor: &'static str, ordinal: usize, collect: Collect) -> SectionRule {
    SectionRule {
        group,
        anchor,
        ordinal,
        collect,
    }
}

/// Section layout of a game write-up, in document order.
pub const LAYOUT: [SectionRule; 10] = [
    rule(Group::Meta, "p", 0, Collect::FromUntil("h1")),
    rule(Group::Intro, "h1", 0, Collect::Until("h2")),
    rule(Group::Expect, "h2", 0, Collect::Until("ul")),
    rule(Group::Characteristics, "ul", 0, Collect::Anchor),
    rule(Group::Played, "h2", 1, Collect::Until("h2")),
    rule(Group::Odds, "h2", 2, Collect::Until("h2")),
    rule(Group::Symbols, "h2", 3, Collect::Until("h2")),
    rule(Group::Test, "h2", 4, Collect::Until("h2")),
    rule(Group::Advantages, "h2", 5, Collect::Until("h2")),
    rule(Group::Play, "h2", 6, Collect::All),
];

/// Parsed write-up with blank top-level nodes removed.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse HTML source. Direct children of `<body>` with no visible text are dropped
    /// so spacer paragraphs never act as anchors or section entries.
    pub fn parse(source: &str) -> Self {
        let mut html = Html::parse_document(source);
        remove_blank_body_nodes(&mut html);
        Self { html }
    }

    /// Read and parse a write-up from disk.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path).map_err(|e| DocumentError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&source))
    }

    /// The `ordinal`-th (0-based) element named `tag`, in document order.
    pub fn anchor(&self, tag: &str, ordinal: usize) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == tag)
            .nth(ordinal)
    }

    /// Split the document into the groups of [LAYOUT].
    pub fn segment(&self) -> Sections<'_> {
        self.segment_with(&LAYOUT)
    }

    /// Split the document using an arbitrary layout table.
    pub fn segment_with(&self, layout: &[SectionRule]) -> Sections<'_> {
        let groups = layout
            .iter()
            .map(|r| {
                let elements = match self.anchor(r.anchor, r.ordinal) {
                    Some(anchor) => match r.collect {
                        Collect::FromUntil(stop) => next_until(anchor, stop, true, None),
                        Collect::Until(stop) => next_until(anchor, stop, false, None),
                        Collect::Anchor => vec![anchor],
                        Collect::All => next_all(anchor),
                    },
                    None => {
                        debug!(
                            "no <{}> #{} anchor; section {} is empty",
                            r.anchor,
                            r.ordinal + 1,
                            r.group.name()
                        );
                        Vec::new()
                    }
                };
                (r.group, elements)
            })
            .collect();
        Sections { groups }
    }
}

/// Elements per group, as produced by [Document::segment].
#[derive(Debug)]
pub struct Sections<'a> {
    groups: Vec<(Group, Vec<ElementRef<'a>>)>,
}

impl<'a> Sections<'a> {
    /// Elements of `group`; empty when the layout has no such group or its anchor is missing.
    pub fn get(&self, group: Group) -> &[ElementRef<'a>] {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, els)| els.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Group, &[ElementRef<'a>])> + '_ {
        self.groups.iter().map(|(g, els)| (*g, els.as_slice()))
    }
}

fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Following element siblings of `elem` up to (not including) the first `<stop>`.
///
/// With `include_start` the walk begins at `elem` itself. With a `filter`, siblings that
/// do not match it are passed over without ending the walk.
pub fn next_until<'a>(
    elem: ElementRef<'a>,
    stop: &str,
    include_start: bool,
    filter: Option<&Selector>,
) -> Vec<ElementRef<'a>> {
    let mut siblings = Vec::new();
    let mut current = if include_start {
        Some(elem)
    } else {
        next_element_sibling(elem)
    };
    while let Some(el) = current {
        if el.value().name() == stop {
            break;
        }
        if filter.map_or(true, |f| f.matches(&el)) {
            siblings.push(el);
        }
        current = next_element_sibling(el);
    }
    siblings
}

/// Every following element sibling of `elem`.
pub fn next_all(elem: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    elem.next_siblings().filter_map(ElementRef::wrap).collect()
}

fn remove_blank_body_nodes(html: &mut Html) {
    let blank: Vec<_> = html
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
        .map(|body| {
            body.children()
                .filter(|child| {
                    child
                        .descendants()
                        .filter_map(|n| n.value().as_text())
                        .all(|t| t.trim().is_empty())
                })
                .map(|child| child.id())
                .collect()
        })
        .unwrap_or_default();
    for id in blank {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }
}
