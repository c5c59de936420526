use super::{write::write_newline, Render};
use crate::{
    doc::{Doc, MeasuredDoc, RefDoc},
    measure::Measure,
};

/// One entry of the printer's work stack.
///
/// `suffix` is the measure of everything that follows this fragment inside
/// its enclosing `Concat`; a `Group` needs it to know how much text must
/// still fit on the line after the group itself.
struct DocFragment<'d, 'a> {
    mdoc: &'d MeasuredDoc<'a>,
    indent: usize,
    is_flat: bool,
    suffix: Measure,
}

/// Single-pass, stack-driven document renderer.
///
/// A printer is single-use: construct one per document. After printing,
/// [`max_stack`](Printer::max_stack) reports the high-water mark of the work
/// stack, which is bounded by document depth plus the widest array fan-out.
pub struct Printer {
    max_width: usize,
    max_stack: usize,
}

impl Printer {
    pub fn new(max_width: usize) -> Printer {
        Printer {
            max_width,
            max_stack: 0,
        }
    }

    /// High-water mark of the fragment stack during the last print.
    pub fn max_stack(&self) -> usize {
        self.max_stack
    }

    /// Would `group`, rendered flat and followed by `suffix`, stay within
    /// the width limit on the current line? Equality counts as fitting.
    fn fits(&self, prefix_len: usize, group: &MeasuredDoc<'_>, suffix: Measure) -> bool {
        let measure = group.measure.flatten().concat(suffix);
        prefix_len + measure.suffix_len() <= self.max_width
    }

    /// Render `document` to `out` in one left-to-right pass.
    ///
    /// Total over well-formed documents; only sink errors propagate.
    pub fn print_doc<'d, W>(
        &mut self,
        document: &'d MeasuredDoc<'d>,
        out: &mut W,
    ) -> Result<(), W::Error>
    where
        W: ?Sized + Render,
    {
        let root = MeasuredDoc {
            doc: Doc::Group(RefDoc(document)),
            measure: document.measure,
        };
        let mut prefix_len = 0;
        let mut fragments = vec![DocFragment {
            mdoc: &root,
            indent: 0,
            is_flat: false,
            suffix: Measure::EMPTY,
        }];

        loop {
            self.max_stack = self.max_stack.max(fragments.len());
            let Some(frag) = fragments.pop() else {
                break;
            };
            match &frag.mdoc.doc {
                Doc::Text(text) => {
                    out.write_str_all(text)?;
                    prefix_len += frag.mdoc.measure.flat;
                }
                Doc::Break(text) => {
                    if frag.is_flat {
                        out.write_str_all(text)?;
                        prefix_len += text.len();
                    } else {
                        write_newline(frag.indent, out)?;
                        prefix_len = frag.indent;
                    }
                }
                Doc::Indent(extra, child) => {
                    fragments.push(DocFragment {
                        mdoc: child.0,
                        indent: frag.indent + extra,
                        is_flat: frag.is_flat,
                        suffix: frag.suffix,
                    });
                }
                Doc::Concat(children) => {
                    // Push in reverse so children pop in order. Each child's
                    // suffix is what follows it: the later siblings, then the
                    // parent fragment's own suffix.
                    let mut suffix = frag.suffix;
                    for child in children.iter().rev() {
                        fragments.push(DocFragment {
                            mdoc: child.0,
                            indent: frag.indent,
                            is_flat: frag.is_flat,
                            suffix,
                        });
                        suffix = child.measure.concat(suffix);
                    }
                }
                Doc::Group(child) => {
                    let is_flat = self.fits(prefix_len, child.0, frag.suffix);
                    fragments.push(DocFragment {
                        mdoc: child.0,
                        indent: frag.indent,
                        is_flat,
                        suffix: frag.suffix,
                    });
                }
                Doc::IfFlat(flat, nonflat) => {
                    let chosen = if frag.is_flat { flat } else { nonflat };
                    fragments.push(DocFragment {
                        mdoc: chosen.0,
                        indent: frag.indent,
                        is_flat: frag.is_flat,
                        suffix: frag.suffix,
                    });
                }
                Doc::Flat(child) => {
                    fragments.push(DocFragment {
                        mdoc: child.0,
                        indent: frag.indent,
                        is_flat: true,
                        suffix: frag.suffix,
                    });
                }
            }
        }

        Ok(())
    }
}
