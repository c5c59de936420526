use std::{fmt, ops::Deref};

type SmallText = arrayvec::ArrayString<22>;

/// String storage for document text.
///
/// Widths are always counted in bytes (`str::len`), including for text that
/// arrives through the `Display` path. Multi-byte UTF-8 therefore measures
/// wider than it displays; that is the documented contract of this crate.
#[derive(Clone)]
pub enum Text<'a> {
    Owned(Box<str>),
    Borrowed(&'a str),
    Small(SmallText),
}

impl Text<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Text::Owned(s) => s,
            Text::Borrowed(s) => s,
            Text::Small(s) => s,
        }
    }

    /// Format a value into a `Text`, staying on the stack for short output.
    pub fn display<T: fmt::Display>(value: T) -> Self {
        use std::fmt::Write;
        let mut buf = FmtText::Small(SmallText::new());
        write!(buf, "{value}").expect("a Display impl returned an error");
        match buf {
            FmtText::Small(b) => Text::Small(b),
            FmtText::Large(b) => Text::Owned(b.into()),
        }
    }
}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl Deref for Text<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl From<String> for Text<'_> {
    fn from(s: String) -> Self {
        Text::Owned(s.into())
    }
}

impl<'a> From<&'a str> for Text<'a> {
    fn from(s: &'a str) -> Self {
        Text::Borrowed(s)
    }
}

impl<'a> From<std::borrow::Cow<'a, str>> for Text<'a> {
    fn from(s: std::borrow::Cow<'a, str>) -> Self {
        match s {
            std::borrow::Cow::Borrowed(s) => Text::Borrowed(s),
            std::borrow::Cow::Owned(s) => Text::Owned(s.into()),
        }
    }
}

enum FmtText {
    Small(SmallText),
    Large(String),
}

impl fmt::Write for FmtText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self {
            FmtText::Small(buf) => {
                if buf.try_push_str(s).is_err() {
                    let mut new_str = String::with_capacity(buf.len() + s.len());
                    new_str.push_str(buf);
                    new_str.push_str(s);
                    *self = FmtText::Large(new_str);
                }
            }
            FmtText::Large(buf) => buf.push_str(s),
        }
        Ok(())
    }
}

macro_rules! make_spaces {
    () => { "" };
    ($s: tt $($t: tt)*) => { concat!("          ", make_spaces!($($t)*)) };
}

pub(crate) const SPACES: &str = make_spaces!(,,,,,,,,,,);
