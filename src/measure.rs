use std::fmt;

/// Width metadata attached to every document node.
///
/// `flat` is the width of the node when rendered entirely on one line.
/// `nonflat` is the width of the first line when the node's first break is
/// taken, or `None` if the node contains no break at all.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Measure {
    pub flat: usize,
    pub nonflat: Option<usize>,
}

impl Measure {
    /// The measure of an empty document.
    pub const EMPTY: Measure = Measure {
        flat: 0,
        nonflat: None,
    };

    pub const fn text(width: usize) -> Measure {
        Measure {
            flat: width,
            nonflat: None,
        }
    }

    /// A break costs zero suffix characters once taken.
    pub const fn break_(width: usize) -> Measure {
        Measure {
            flat: width,
            nonflat: Some(0),
        }
    }

    /// Erase the break: the measure of this node forced flat.
    pub const fn flatten(self) -> Measure {
        Measure {
            flat: self.flat,
            nonflat: None,
        }
    }

    /// Sequence two measures. The first break encountered dominates: if
    /// `self` breaks, everything in `other` lands after that break and only
    /// contributes to `flat`; otherwise `other`'s first line extends ours.
    pub fn concat(self, other: Measure) -> Measure {
        match (self.nonflat, other.nonflat) {
            (Some(n), _) => Measure {
                flat: self.flat + other.flat,
                nonflat: Some(n),
            },
            (None, Some(n)) => Measure {
                flat: self.flat + other.flat,
                nonflat: Some(self.flat + n),
            },
            (None, None) => Measure {
                flat: self.flat + other.flat,
                nonflat: None,
            },
        }
    }

    /// Width of the text before the next newline, whether that newline comes
    /// from a break in this measure or never.
    pub fn suffix_len(self) -> usize {
        self.nonflat.unwrap_or(self.flat)
    }
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nonflat {
            Some(n) => write!(f, "Measure({}, {})", self.flat, n),
            None => write!(f, "Measure({}, -)", self.flat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_no_breaks() {
        let m = Measure::text(3).concat(Measure::text(4));
        assert_eq!(m, Measure::text(7));
    }

    #[test]
    fn concat_first_break_dominates() {
        // "ab" <break> ... followed by anything: first line stays at 2.
        let m = Measure::text(2)
            .concat(Measure::break_(1))
            .concat(Measure::text(10));
        assert_eq!(m.flat, 13);
        assert_eq!(m.nonflat, Some(2));
    }

    #[test]
    fn concat_break_on_right() {
        let m = Measure::text(5).concat(Measure::break_(1));
        assert_eq!(m.flat, 6);
        assert_eq!(m.nonflat, Some(5));
    }

    #[test]
    fn concat_is_associative() {
        let ms = [
            Measure::text(2),
            Measure::break_(1),
            Measure::text(4),
            Measure::break_(0),
        ];
        for a in ms {
            for b in ms {
                for c in ms {
                    assert_eq!(a.concat(b).concat(c), a.concat(b.concat(c)));
                }
            }
        }
    }

    #[test]
    fn concat_empty_is_identity() {
        for m in [Measure::text(3), Measure::break_(1), Measure::EMPTY] {
            assert_eq!(Measure::EMPTY.concat(m), m);
            assert_eq!(m.concat(Measure::EMPTY), m);
        }
    }

    #[test]
    fn suffix_len_prefers_first_line() {
        assert_eq!(Measure::text(7).suffix_len(), 7);
        assert_eq!(Measure::text(7).concat(Measure::break_(1)).suffix_len(), 7);
        assert_eq!(Measure::break_(1).suffix_len(), 0);
    }

    #[test]
    fn flatten_erases_break() {
        let m = Measure::break_(1).flatten();
        assert_eq!(m, Measure::text(1));
    }
}
