use std::{fmt, ops::Deref};

use crate::{
    hnode::{Color, HNode, Record},
    measure::Measure,
    text::Text,
};

/// A layout primitive paired with its pre-computed [`Measure`].
///
/// Documents are immutable once built. The [`DocArena`](crate::DocArena)
/// computes measures bottom-up at construction time, so the printer can make
/// every flat-or-broken decision in a single left-to-right pass without
/// lookahead.
pub struct MeasuredDoc<'a> {
    pub(crate) doc: Doc<'a>,
    pub(crate) measure: Measure,
}

/// The layout algebra.
pub enum Doc<'a> {
    /// Literal output; never splits.
    Text(Text<'a>),
    /// Renders as its string when flat, as newline plus indentation when
    /// broken.
    Break(Text<'a>),
    /// Ordered concatenation. Construction splices nested `Concat`s, so the
    /// sequence never contains a direct `Concat` child.
    Concat(Vec<RefDoc<'a>>),
    /// Adds to the indentation level of the child.
    Indent(usize, RefDoc<'a>),
    /// Decision point: rendered flat if it fits the remaining width.
    Group(RefDoc<'a>),
    /// Forces the subtree flat unconditionally.
    Flat(RefDoc<'a>),
    /// Selects the first child in flat context, the second when broken.
    IfFlat(RefDoc<'a>, RefDoc<'a>),
}

/// A copyable reference to an arena-allocated [`MeasuredDoc`].
pub struct RefDoc<'a>(pub(crate) &'a MeasuredDoc<'a>);

impl Copy for RefDoc<'_> {}
impl Clone for RefDoc<'_> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Deref for RefDoc<'a> {
    type Target = MeasuredDoc<'a>;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl fmt::Debug for RefDoc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'a> MeasuredDoc<'a> {
    pub fn doc(&self) -> &Doc<'a> {
        &self.doc
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    /// Number of nodes in this document, each variant counting itself plus
    /// its children. Reported by the perf-stats output.
    pub fn count(&self) -> usize {
        match &self.doc {
            Doc::Text(_) | Doc::Break(_) => 1,
            Doc::Indent(_, child) | Doc::Group(child) | Doc::Flat(child) => 1 + child.count(),
            Doc::IfFlat(flat, nonflat) => 1 + flat.count() + nonflat.count(),
            Doc::Concat(children) => 1 + children.iter().map(|c| c.count()).sum::<usize>(),
        }
    }

    /// Reflect the document as an [`HNode`] tree, one record per variant.
    ///
    /// This lets the doc-debug path feed a document's own structure back
    /// through the printer.
    pub fn to_hnode(&self) -> HNode {
        match &self.doc {
            Doc::Text(s) => Record::new("Text")
                .field("s", HNode::leaf(s.as_str(), Color::StringConst))
                .into(),
            Doc::Break(s) => Record::new("Break")
                .field("s", HNode::leaf(s.as_str(), Color::StringConst))
                .into(),
            Doc::Indent(indent, child) => Record::new("Indent")
                .field("indent", HNode::leaf(indent.to_string(), Color::OtherConst))
                .field("child", child.to_hnode())
                .into(),
            Doc::Group(child) => Record::new("Group").field("child", child.to_hnode()).into(),
            Doc::Flat(child) => Record::new("Flat").field("child", child.to_hnode()).into(),
            Doc::IfFlat(flat, nonflat) => Record::new("IfFlat")
                .field("flat", flat.to_hnode())
                .field("nonflat", nonflat.to_hnode())
                .into(),
            Doc::Concat(children) => {
                let mut record = Record::new("Concat");
                record.unnamed_fields = children.iter().map(|c| c.to_hnode()).collect();
                record.into()
            }
        }
    }
}

impl fmt::Debug for MeasuredDoc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.doc.fmt(f)
    }
}

impl fmt::Debug for Doc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Doc::Text(s) => s.fmt(f),
            Doc::Break(s) => f.debug_tuple("Break").field(&s.as_str()).finish(),
            Doc::Concat(children) => f.debug_list().entries(children.iter()).finish(),
            Doc::Indent(indent, child) => {
                write!(f, "Indent({indent}, ")?;
                child.fmt(f)?;
                write!(f, ")")
            }
            Doc::Group(child) => f.debug_tuple("Group").field(child).finish(),
            Doc::Flat(child) => f.debug_tuple("Flat").field(child).finish(),
            Doc::IfFlat(flat, nonflat) => f
                .debug_tuple("IfFlat")
                .field(flat)
                .field(nonflat)
                .finish(),
        }
    }
}
