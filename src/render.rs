mod print;
mod write;

use std::{fmt, io};

use crate::doc::MeasuredDoc;

pub use print::Printer;
pub use write::{FmtWrite, IoWrite};

/// Adapter returned by [`MeasuredDoc::print`], implementing `Display`.
pub struct PrettyFmt<'d, 'a> {
    doc: &'d MeasuredDoc<'a>,
    width: usize,
}

impl fmt::Display for PrettyFmt<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.doc.render_fmt(self.width, f)
    }
}

impl<'a> MeasuredDoc<'a> {
    /// Writes the rendered document to a `std::io::Write` sink.
    #[inline]
    pub fn render<W>(&self, width: usize, out: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.render_raw(width, &mut IoWrite::new(out))
    }

    /// Writes the rendered document to a `std::fmt::Write` sink.
    #[inline]
    pub fn render_fmt<W>(&self, width: usize, out: &mut W) -> fmt::Result
    where
        W: ?Sized + fmt::Write,
    {
        self.render_raw(width, &mut FmtWrite::new(out))
    }

    /// Writes the rendered document to any [`Render`] sink.
    #[inline]
    pub fn render_raw<W>(&self, width: usize, out: &mut W) -> Result<(), W::Error>
    where
        W: ?Sized + Render,
    {
        Printer::new(width).print_doc(self, out)
    }

    /// Returns a value which implements `std::fmt::Display`.
    ///
    /// ```
    /// use prettytree::DocArena;
    /// let arena = DocArena::new();
    /// let doc = arena.group(arena.concat([
    ///     arena.text("hello"),
    ///     arena.break_(" "),
    ///     arena.text("world"),
    /// ]));
    /// assert_eq!(format!("{}", doc.print(80)), "hello world");
    /// ```
    #[inline]
    pub fn print<'d>(&'d self, width: usize) -> PrettyFmt<'d, 'a> {
        PrettyFmt { doc: self, width }
    }
}

/// The operations a sink must provide to receive rendered output.
///
/// Rendering is total over well-formed documents; the only failures that can
/// surface are the sink's own, through `Error`.
pub trait Render {
    type Error;

    fn write_str(&mut self, s: &str) -> Result<usize, Self::Error>;

    fn write_str_all(&mut self, mut s: &str) -> Result<(), Self::Error> {
        while !s.is_empty() {
            let count = self.write_str(s)?;
            s = &s[count..];
        }
        Ok(())
    }
}
