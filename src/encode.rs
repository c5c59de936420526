use std::{borrow::Cow, collections::HashMap};

use crate::{
    ansi,
    arena::DocArena,
    doc::{Doc, RefDoc},
    hnode::{Color, Field, HNode},
    measure::Measure,
    strutil::encode_string,
    text::Text,
};

// ansi::BOLD followed by ansi::BLUE.
const EXTERNAL_STYLE: &str = "\x1b[1m\x1b[34m";

fn leaf_style(color: Color) -> &'static str {
    match color {
        Color::TypeName => ansi::YELLOW,
        Color::StringConst => ansi::BOLD,
        Color::OtherConst => ansi::GREEN,
        Color::External => EXTERNAL_STYLE,
        Color::UserType => ansi::GREEN,
    }
}

/// Translates [`HNode`] trees into measured documents.
///
/// An encoder borrows a [`DocArena`] and holds mutable configuration, so it
/// is not meant to be shared; build one per print. The documents it returns
/// live as long as the arena.
pub struct HNodeEncoder<'a> {
    arena: &'a DocArena<'a>,
    indent: usize,
    use_styles: bool,
    max_tabular_width: usize,
    // Cleared on each entry; reserved for producers layered on top of the
    // encoder. Nothing reads it today.
    visiting: HashMap<usize, bool>,
    type_color: &'static str,
}

impl<'a> HNodeEncoder<'a> {
    pub fn new(arena: &'a DocArena<'a>) -> HNodeEncoder<'a> {
        HNodeEncoder {
            arena,
            indent: 4,
            use_styles: true,
            max_tabular_width: 22,
            visiting: HashMap::new(),
            type_color: ansi::YELLOW,
        }
    }

    /// Indentation step in spaces. Default 4.
    pub fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    /// Whether to emit ANSI escapes. Default true.
    pub fn set_use_styles(&mut self, use_styles: bool) {
        self.use_styles = use_styles;
    }

    /// Arrays whose widest flat item stays below this threshold render in
    /// padded columns when broken. Default 22.
    pub fn set_max_tabular_width(&mut self, max_tabular_width: usize) {
        self.max_tabular_width = max_tabular_width;
    }

    /// Encode a whole tree.
    pub fn hnode(&mut self, h: &'a HNode) -> RefDoc<'a> {
        self.visiting.clear();
        self.encode(h)
    }

    fn encode(&mut self, h: &'a HNode) -> RefDoc<'a> {
        let arena = self.arena;
        match h {
            HNode::AlreadySeen { heap_id } => arena.text(format!("...0x{heap_id:x}")),
            HNode::Leaf { s, color } => {
                self.styled_text(leaf_style(*color), encode_string(s, true))
            }
            HNode::Array { children } if children.is_empty() => arena.text("[]"),
            HNode::Array { children } => {
                let children: Vec<_> = children.iter().map(|c| self.encode(c)).collect();
                self.surrounded("[", self.tabular(&children, ""), "]")
            }
            HNode::Record(record) => {
                let type_name = (!record.node_type.is_empty())
                    .then(|| self.styled_text(self.type_color, Cow::Borrowed(&*record.node_type)));

                let mdocs: Vec<RefDoc<'a>> = if !record.unnamed_fields.is_empty() {
                    record.unnamed_fields.iter().map(|c| self.encode(c)).collect()
                } else if !record.fields.is_empty() {
                    record.fields.iter().map(|f| self.field(f)).collect()
                } else {
                    // Fieldless record: just the delimiters around the name.
                    let mut parts = vec![arena.text(&*record.left)];
                    parts.extend(type_name);
                    parts.push(arena.text(&*record.right));
                    return arena.concat(parts);
                };

                let child = self.join(&mdocs, "", " ");
                match type_name {
                    Some(type_name) => {
                        self.surrounded_prefixed(&record.left, type_name, " ", child, &record.right)
                    }
                    None => self.surrounded(&record.left, child, &record.right),
                }
            }
        }
    }

    fn field(&mut self, field: &'a Field) -> RefDoc<'a> {
        let name = self.arena.text(format!("{}:", field.name));
        let val = self.encode(&field.val);
        self.arena.concat([name, val])
    }

    /// Wrap `mdoc` in style escapes. The escapes carry an empty measure, so
    /// styling never affects layout decisions.
    pub fn styled(&self, style: &'static str, mdoc: RefDoc<'a>) -> RefDoc<'a> {
        if !self.use_styles {
            return mdoc;
        }
        let on = self.arena.alloc(Doc::Text(Text::Borrowed(style)), Measure::EMPTY);
        let off = self
            .arena
            .alloc(Doc::Text(Text::Borrowed(ansi::RESET)), Measure::EMPTY);
        self.arena.concat([on, mdoc, off])
    }

    /// A single styled text whose measure is the raw, unstyled byte length.
    pub fn styled_text(&self, style: &'static str, s: Cow<'a, str>) -> RefDoc<'a> {
        let measure = Measure::text(s.len());
        let text: Text<'a> = if self.use_styles {
            format!("{style}{s}{}", ansi::RESET).into()
        } else {
            s.into()
        };
        self.arena.alloc(Doc::Text(text), measure)
    }

    /// `left`, then `mdoc` indented behind an empty break, then `right`
    /// behind another, all in one group: flat it reads `left mdoc right`
    /// with no gaps; broken, the delimiters sit on their own lines.
    pub fn surrounded(&self, left: &'a str, mdoc: RefDoc<'a>, right: &'a str) -> RefDoc<'a> {
        let arena = self.arena;
        arena.group(arena.concat([
            arena.text(left),
            arena.indent(self.indent, arena.concat([arena.break_(""), mdoc])),
            arena.break_(""),
            arena.text(right),
        ]))
    }

    /// Like [`surrounded`](Self::surrounded), with `prefix` directly after
    /// `left` and `sep` as the break before the body.
    pub fn surrounded_prefixed(
        &self,
        left: &'a str,
        prefix: RefDoc<'a>,
        sep: &'a str,
        mdoc: RefDoc<'a>,
        right: &'a str,
    ) -> RefDoc<'a> {
        let arena = self.arena;
        arena.group(arena.concat([
            arena.text(left),
            prefix,
            arena.indent(self.indent, arena.concat([arena.break_(sep), mdoc])),
            arena.break_(""),
            arena.text(right),
        ]))
    }

    /// Interleave `sep` plus a `space` break between items.
    pub fn join(&self, items: &[RefDoc<'a>], sep: &'a str, space: &'a str) -> RefDoc<'a> {
        let arena = self.arena;
        let mut seq = Vec::with_capacity(items.len() * 3);
        for (i, item) in items.iter().enumerate() {
            if i != 0 {
                seq.push(arena.text(sep));
                seq.push(arena.break_(space));
            }
            seq.push(*item);
        }
        arena.concat(seq)
    }

    /// Join items so that, when the enclosing group breaks, short items line
    /// up in padded columns instead of one per line.
    ///
    /// Each item but the last is padded to the widest flat item plus one
    /// space; the padding is itself a grouped break, so a column still wraps
    /// when the line is too full. Items wider than `max_tabular_width`
    /// disable the column form entirely.
    pub fn tabular(&self, items: &[RefDoc<'a>], sep: &'a str) -> RefDoc<'a> {
        let arena = self.arena;
        if items.is_empty() {
            return arena.text("");
        }

        let mut max_flat_len = 0;
        let mut seq = Vec::with_capacity(items.len() * 3);
        for (i, item) in items.iter().enumerate() {
            if i != 0 {
                seq.push(arena.text(sep));
                seq.push(arena.break_(" "));
            }
            seq.push(*item);
            max_flat_len = max_flat_len.max(item.measure().flat);
        }
        let non_tabular = arena.concat(seq);

        if max_flat_len + sep.len() + 1 > self.max_tabular_width {
            return non_tabular;
        }

        let mut tabular_seq = Vec::with_capacity(items.len() * 3);
        for (i, item) in items.iter().enumerate() {
            tabular_seq.push(arena.flat(*item));
            if i != items.len() - 1 {
                let padding = max_flat_len - item.measure().flat + 1;
                tabular_seq.push(arena.text(sep));
                tabular_seq.push(arena.group(arena.break_(" ".repeat(padding))));
            }
        }
        let tabular = arena.concat(tabular_seq);
        arena.group(arena.if_flat(non_tabular, tabular))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_wraps_without_adding_width() {
        let arena = DocArena::new();
        let encoder = HNodeEncoder::new(&arena);
        let inner = arena.text("x");
        let doc = encoder.styled(ansi::GREEN, inner);
        assert_eq!(doc.measure(), inner.measure());
        let mut s = String::new();
        doc.render_fmt(80, &mut s).unwrap();
        assert_eq!(s, "\x1b[32mx\x1b[0;0m");
    }

    #[test]
    fn styled_is_identity_without_styles() {
        let arena = DocArena::new();
        let mut encoder = HNodeEncoder::new(&arena);
        encoder.set_use_styles(false);
        let inner = arena.text("x");
        let doc = encoder.styled(ansi::GREEN, inner);
        let mut s = String::new();
        doc.render_fmt(80, &mut s).unwrap();
        assert_eq!(s, "x");
    }

    #[test]
    fn styled_escapes_never_shift_a_group_decision() {
        let arena = DocArena::new();
        let encoder = HNodeEncoder::new(&arena);
        let body = arena.concat([arena.text("aa"), arena.break_(" "), arena.text("bb")]);
        let doc = arena.group(encoder.styled(ansi::BOLD, body));
        // Fits in exactly the visible width despite the escape bytes.
        let mut s = String::new();
        doc.render_fmt(5, &mut s).unwrap();
        assert_eq!(s, format!("{}aa bb{}", ansi::BOLD, ansi::RESET));
    }
}
