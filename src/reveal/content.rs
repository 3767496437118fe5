// content.rs - Per-element reveal plan
//
// A static table of page sections, each row a selector and a delay in
// units of `element_delay_unit`. Rows that match nothing are dropped; rows
// that match a list fan out with a per-item stagger.

use super::page::Page;
use crate::config::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Navigation,
    Hero,
    Description,
    Modules,
    Gallery,
    References,
    Footer,
}

/// Whether an element's text is re-typed when it appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Typing {
    Never,
    Always,
    /// Only `<p>` children of a list row.
    Paragraphs,
}

#[derive(Clone, Copy, Debug)]
enum Match {
    One,
    /// Every match, the i-th delayed by an extra `i * stagger` units.
    All { stagger: f32 },
}

#[derive(Clone, Copy, Debug)]
struct Row {
    section: Section,
    selector: &'static str,
    at: f32,
    typing: Typing,
    matches: Match,
}

const fn one(section: Section, selector: &'static str, at: f32, typing: Typing) -> Row {
    Row { section, selector, at, typing, matches: Match::One }
}

const fn all(section: Section, selector: &'static str, at: f32, stagger: f32, typing: Typing) -> Row {
    Row { section, selector, at, typing, matches: Match::All { stagger } }
}

use Section::*;
use Typing::*;

#[rustfmt::skip]
const TABLE: &[Row] = &[
    one(Navigation,  "nav",                                    0.0,  Never),

    one(Hero,        ".hero h1",                               2.0,  Always),
    one(Hero,        ".hero .subtitle",                        4.0,  Always),

    one(Description, "#description .section-title",            6.0,  Always),
    one(Description, "#description .section-divider",          7.0,  Never),
    all(Description, "#description .description-content > *", 8.0,  2.0, Paragraphs),

    one(Modules,     "#modules .section-title",                16.0, Always),
    one(Modules,     "#modules .section-divider",              17.0, Never),
    all(Modules,     ".module-card",                           18.0, 4.0, Never),

    one(Gallery,     "#gallery .section-title",                38.0, Always),
    one(Gallery,     "#gallery .section-divider",              39.0, Never),
    one(Gallery,     "#gallery .gallery-intro",                40.0, Always),
    all(Gallery,     ".gallery-item",                          42.0, 2.0, Never),

    one(References,  "#references .section-title",             50.0, Always),
    one(References,  "#references .section-divider",           51.0, Never),
    all(References,  ".reference-list li",                     52.0, 1.6, Never),

    one(Footer,      "footer",                                 62.0, Never),
];

/// One scheduled element reveal.
#[derive(Clone, Debug)]
pub struct RevealStep<N> {
    pub node: N,
    pub section: Section,
    /// Offset from stage start.
    pub delay: Millis,
    pub typewriter: bool,
}

fn to_millis(units: f32, unit: Millis) -> Millis {
    (units * unit as f32).round() as Millis
}

/// Build the reveal plan from the document as it is right now.
pub fn plan<P: Page>(page: &P, unit: Millis) -> Vec<RevealStep<P::Node>> {
    let mut steps = Vec::new();

    for row in TABLE {
        match row.matches {
            Match::One => {
                let Some(node) = page.query(row.selector) else {
                    log::debug!("{:?}: nothing matches {:?}", row.section, row.selector);
                    continue;
                };
                steps.push(RevealStep {
                    node,
                    section: row.section,
                    delay: to_millis(row.at, unit),
                    typewriter: row.typing == Always,
                });
            }
            Match::All { stagger } => {
                for (i, node) in page.query_all(row.selector).into_iter().enumerate() {
                    let typewriter = match row.typing {
                        Never => false,
                        Always => true,
                        Paragraphs => page.tag_name(&node).eq_ignore_ascii_case("P"),
                    };
                    steps.push(RevealStep {
                        node,
                        section: row.section,
                        delay: to_millis(row.at + i as f32 * stagger, unit),
                        typewriter,
                    });
                }
            }
        }
    }

    steps
}

/// When the content stage completes for `steps`, relative to stage start.
pub fn completion_offset<N>(steps: &[RevealStep<N>], buffer: Millis) -> Millis {
    steps.iter().map(|s| s.delay).max().unwrap_or(0) + buffer
}
