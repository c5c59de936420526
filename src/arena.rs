use std::{borrow::Cow, fmt};

use crate::{
    doc::{Doc, MeasuredDoc, RefDoc},
    measure::Measure,
    text::Text,
};

// The breaks emitted by every surround/join layout, interned so the hot
// constructors skip the arena.
static BREAK_EMPTY: MeasuredDoc<'static> = MeasuredDoc {
    doc: Doc::Break(Text::Borrowed("")),
    measure: Measure::break_(0),
};
static BREAK_SPACE: MeasuredDoc<'static> = MeasuredDoc {
    doc: Doc::Break(Text::Borrowed(" ")),
    measure: Measure::break_(1),
};

/// Allocates [`MeasuredDoc`] values and computes their measures bottom-up.
///
/// All documents built for one print call live in the arena and are dropped
/// together with it; the constructors hand out cheap [`RefDoc`] references.
pub struct DocArena<'a> {
    docs: typed_arena::Arena<MeasuredDoc<'a>>,
}

impl Default for DocArena<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DocArena<'a> {
    pub fn new() -> Self {
        Self {
            docs: typed_arena::Arena::new(),
        }
    }

    pub(crate) fn alloc(&'a self, doc: Doc<'a>, measure: Measure) -> RefDoc<'a> {
        RefDoc(self.docs.alloc(MeasuredDoc { doc, measure }))
    }

    /// Literal text. Must not contain line breaks; its width is its byte
    /// length.
    pub fn text(&'a self, s: impl Into<Cow<'a, str>>) -> RefDoc<'a> {
        let text: Text<'a> = s.into().into();
        let measure = Measure::text(text.len());
        self.alloc(Doc::Text(text), measure)
    }

    /// The text `value.to_string()`, which must not contain line breaks.
    pub fn as_string<T: fmt::Display>(&'a self, value: T) -> RefDoc<'a> {
        let text = Text::display(value);
        let measure = Measure::text(text.len());
        self.alloc(Doc::Text(text), measure)
    }

    /// A break: renders as `s` while flat, as newline plus indentation when
    /// its group breaks.
    pub fn break_(&'a self, s: impl Into<Cow<'a, str>>) -> RefDoc<'a> {
        let s = s.into();
        if s.is_empty() {
            return RefDoc(&BREAK_EMPTY);
        }
        if s == " " {
            return RefDoc(&BREAK_SPACE);
        }
        let text: Text<'a> = s.into();
        let measure = Measure::break_(text.len());
        self.alloc(Doc::Break(text), measure)
    }

    /// Add `indent` to the indentation level of `child`. Does not affect the
    /// measure.
    pub fn indent(&'a self, indent: usize, child: RefDoc<'a>) -> RefDoc<'a> {
        let measure = child.measure;
        self.alloc(Doc::Indent(indent, child), measure)
    }

    /// A layout decision point: `child` renders flat iff it fits the
    /// remaining width.
    pub fn group(&'a self, child: RefDoc<'a>) -> RefDoc<'a> {
        let measure = child.measure;
        self.alloc(Doc::Group(child), measure)
    }

    /// Force `child` flat regardless of any enclosing group's decision.
    pub fn flat(&'a self, child: RefDoc<'a>) -> RefDoc<'a> {
        let measure = child.measure.flatten();
        self.alloc(Doc::Flat(child), measure)
    }

    /// Render `flat` in flat context and `nonflat` when broken. The measure
    /// takes its flat width from `flat` and its first-line width from
    /// `nonflat`.
    pub fn if_flat(&'a self, flat: RefDoc<'a>, nonflat: RefDoc<'a>) -> RefDoc<'a> {
        let measure = Measure {
            flat: flat.measure.flat,
            nonflat: nonflat.measure.nonflat,
        };
        self.alloc(Doc::IfFlat(flat, nonflat), measure)
    }

    /// Concatenate documents in order.
    ///
    /// Nested `Concat` children are spliced into a single flat sequence here,
    /// at construction; the printer never sees a `Concat` directly inside
    /// another. Measures accumulate across the splice.
    pub fn concat(&'a self, mdocs: impl IntoIterator<Item = RefDoc<'a>>) -> RefDoc<'a> {
        let mut spliced = Vec::new();
        let mut measure = Measure::EMPTY;
        for mdoc in mdocs {
            measure = measure.concat(mdoc.measure);
            match &mdoc.doc {
                // Children of an existing Concat are already spliced, so one
                // level is enough.
                Doc::Concat(children) => spliced.extend_from_slice(children),
                _ => spliced.push(mdoc),
            }
        }
        self.alloc(Doc::Concat(spliced), measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_measures_bytes() {
        let arena = DocArena::new();
        assert_eq!(arena.text("hello").measure(), Measure::text(5));
        // Deliberately bytes, not display columns.
        assert_eq!(arena.text("éé").measure(), Measure::text(4));
    }

    #[test]
    fn break_measures_zero_suffix() {
        let arena = DocArena::new();
        assert_eq!(arena.break_(" ").measure(), Measure::break_(1));
        assert_eq!(arena.break_("").measure(), Measure::break_(0));
    }

    #[test]
    fn concat_splices_nested_sequences() {
        let arena = DocArena::new();
        let inner = arena.concat([arena.text("a"), arena.text("b")]);
        let outer = arena.concat([inner, arena.text("c")]);
        match outer.doc() {
            Doc::Concat(children) => {
                assert_eq!(children.len(), 3);
                assert!(children
                    .iter()
                    .all(|c| !matches!(c.doc(), Doc::Concat(_))));
            }
            other => panic!("expected Concat, got {other:?}"),
        }
        assert_eq!(outer.measure(), Measure::text(3));
    }

    #[test]
    fn concat_measure_matches_nesting_shape() {
        let arena = DocArena::new();
        let a = arena.text("aa");
        let b = arena.break_(" ");
        let c = arena.text("cccc");
        let left = arena.concat([arena.concat([a, b]), c]);
        let right = arena.concat([a, arena.concat([b, c])]);
        let flat = arena.concat([a, b, c]);
        assert_eq!(left.measure(), flat.measure());
        assert_eq!(right.measure(), flat.measure());
    }

    #[test]
    fn empty_concat_is_empty() {
        let arena = DocArena::new();
        let doc = arena.concat([]);
        assert_eq!(doc.measure(), Measure::EMPTY);
    }

    #[test]
    fn flat_erases_breaks_from_measure() {
        let arena = DocArena::new();
        let doc = arena.concat([arena.text("a"), arena.break_(" "), arena.text("b")]);
        assert_eq!(doc.measure().nonflat, Some(1));
        assert_eq!(arena.flat(doc).measure(), Measure::text(3));
    }
}
