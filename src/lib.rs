//! # prettytree
//!
//! The renderer surface and text plumbing are adapted from pretty.rs.
//!
//! Original work Copyright (c) 2014 Jonathan Sterling and Darin Morrison
//! Modifications Copyright (c) 2025 QuadnucYard
//!
//! A width-aware pretty-printer for heterogeneous tree data, of the kind an
//! ASDL runtime produces when asked to dump a syntax tree: records, arrays,
//! and styled leaves.
//!
//! The layout engine is [Wadler-style](http://homepages.inf.ed.ac.uk/wadler/papers/prettier/prettier.pdf),
//! with one twist: every document node carries a pre-computed [`Measure`]
//! (its flat width and the width of its first line when broken), so the
//! printer decides flat-versus-broken for each [group](DocArena::group) in a
//! single left-to-right pass, without lookahead or backtracking.
//!
//! ## Quick start
//!
//! Build an [`HNode`] tree and print it:
//!
//! ```rust
//! use prettytree::{pretty_print_with, Color, HNode, PrintOptions, Record};
//!
//! let node: HNode = Record::new("BinOp")
//!     .field("op", HNode::leaf("Add", Color::TypeName))
//!     .field("lhs", HNode::leaf("1", Color::OtherConst))
//!     .field("rhs", HNode::leaf("2", Color::OtherConst))
//!     .into();
//!
//! let mut out = Vec::new();
//! pretty_print_with(&node, &mut out, 80, &PrintOptions::default()).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "(BinOp op:Add lhs:1 rhs:2)\n",
//! );
//! ```
//!
//! When the line does not fit, the record breaks with its fields indented:
//!
//! ```rust
//! # use prettytree::{pretty_print_with, Color, HNode, PrintOptions, Record};
//! # let node: prettytree::HNode = Record::new("BinOp")
//! #     .field("op", HNode::leaf("Add", Color::TypeName))
//! #     .field("lhs", HNode::leaf("1", Color::OtherConst))
//! #     .field("rhs", HNode::leaf("2", Color::OtherConst))
//! #     .into();
//! let mut out = Vec::new();
//! pretty_print_with(&node, &mut out, 12, &PrintOptions::default()).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "(BinOp\n    op:Add\n    lhs:1\n    rhs:2\n)\n",
//! );
//! ```
//!
//! ## Lower-level use
//!
//! Documents can also be built directly against a [`DocArena`] and rendered
//! with [`MeasuredDoc::render`] or [`MeasuredDoc::print`]; see those types
//! for examples. All documents built for one print share the arena and are
//! freed together with it.

pub mod ansi;
mod arena;
mod doc;
mod encode;
mod hnode;
mod measure;
mod render;
mod strutil;
mod text;

use std::io::{self, IsTerminal, Write};

pub use arena::DocArena;
pub use doc::{Doc, MeasuredDoc, RefDoc};
pub use encode::HNodeEncoder;
pub use hnode::{Color, Field, HNode, Record, TraversalState, FALSE_STR, TRUE_STR};
pub use measure::Measure;
pub use render::{FmtWrite, IoWrite, PrettyFmt, Printer, Render};
pub use strutil::{encode_string, escape_html};
pub use text::Text;

/// Flags for [`pretty_print_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PrintOptions {
    /// Emit ANSI escapes around styled leaves and type names.
    pub use_styles: bool,
    /// Write node/doc counts and the printer's stack high-water mark to
    /// stderr.
    pub perf_stats: bool,
    /// First pretty-print the document's own tree, for debugging layout.
    pub doc_debug: bool,
}

/// Pretty-print `node` to `f` with a trailing newline, emitting styles iff
/// `f` is a terminal.
pub fn pretty_print<W>(node: &HNode, f: &mut W, max_width: usize) -> io::Result<()>
where
    W: Write + IsTerminal,
{
    let opts = PrintOptions {
        use_styles: f.is_terminal(),
        ..PrintOptions::default()
    };
    pretty_print_with(node, f, max_width, &opts)
}

/// Pretty-print `node` to `f` with a trailing newline and explicit options.
///
/// The whole document is rendered into an internal buffer and written with a
/// single call, so a partially failing sink never receives a torn line.
pub fn pretty_print_with<W>(
    node: &HNode,
    f: &mut W,
    max_width: usize,
    opts: &PrintOptions,
) -> io::Result<()>
where
    W: ?Sized + Write,
{
    if opts.perf_stats {
        eprintln!("___ HNODE COUNT {}", node.count());
    }

    let arena = DocArena::new();
    let mut encoder = HNodeEncoder::new(&arena);
    encoder.set_use_styles(opts.use_styles);
    let document = encoder.hnode(node);

    if opts.doc_debug {
        let tree = document.to_hnode();
        let debug_opts = PrintOptions {
            doc_debug: false,
            perf_stats: false,
            ..*opts
        };
        pretty_print_with(&tree, f, max_width, &debug_opts)?;
    }
    if opts.perf_stats {
        eprintln!("___ DOC COUNT {}", document.count());
    }

    let mut printer = Printer::new(max_width);
    let mut buf = Vec::new();
    printer.print_doc(&document, &mut IoWrite::new(&mut buf))?;
    f.write_all(&buf)?;
    f.write_all(b"\n")?;

    if opts.perf_stats {
        eprintln!("___ MAX STACK {}", printer.max_stack());
    }
    Ok(())
}
