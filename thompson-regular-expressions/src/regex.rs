use std::collections::BTreeSet;
#[cfg(feature = "pretty-print")]
use std::fmt::{Display, Formatter};

/// A parsed regular expression.
///
/// Composite nodes exclusively own their children. Trees are built bottom-up (by the parser or
/// the constructor functions below) and never mutated afterwards.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub enum Regex {
    /// Matches exactly one symbol.
    Literal(char),
    /// Matches the empty string. Written `@` in patterns.
    Epsilon,
    /// Matches the left expression followed by the right expression.
    Concat(Box<Regex>, Box<Regex>),
    /// Matches either branch.
    Union(Box<Regex>, Box<Regex>),
    /// Matches zero or more repetitions of the inner expression.
    Star(Box<Regex>),
}

impl Regex {
    /// Matches the single symbol `c`.
    pub fn literal(c: char) -> Self {
        Regex::Literal(c)
    }

    /// Matches `l` followed by `r`.
    pub fn concat(l: Regex, r: Regex) -> Self {
        Regex::Concat(Box::new(l), Box::new(r))
    }

    /// Matches either `l` or `r`.
    pub fn union(l: Regex, r: Regex) -> Self {
        Regex::Union(Box::new(l), Box::new(r))
    }

    /// Wraps `inner` in a star, unless it already is one.
    ///
    /// `a**` accepts exactly what `a*` accepts, so stars never stack.
    pub fn star(inner: Regex) -> Self {
        match inner {
            star @ Regex::Star(_) => star,
            inner => Regex::Star(Box::new(inner)),
        }
    }

    /// Returns true if the empty string is in the language of this expression.
    pub fn is_nullable(&self) -> bool {
        match self {
            Regex::Literal(_) => false,
            Regex::Epsilon => true,
            Regex::Concat(l, r) => l.is_nullable() && r.is_nullable(),
            Regex::Union(l, r) => l.is_nullable() || r.is_nullable(),
            Regex::Star(_) => true,
        }
    }

    /// All symbols that occur as a literal somewhere in this expression.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut alphabet = BTreeSet::new();
        self.walk(|regex| {
            if let Regex::Literal(c) = regex {
                alphabet.insert(*c);
            }
        });
        alphabet
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut size = 0;
        self.walk(|_| size += 1);
        size
    }

    /// Visits every node, parents before children, left before right.
    ///
    /// Uses an explicit stack: a long pattern parses to a chain as deep as the pattern is long.
    fn walk(&self, mut visit: impl FnMut(&Regex)) {
        let mut stack = vec![self];
        while let Some(regex) = stack.pop() {
            visit(regex);
            match regex {
                Regex::Literal(_) | Regex::Epsilon => {}
                Regex::Star(i) => stack.push(i),
                Regex::Concat(l, r) | Regex::Union(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
    }

    /// Moves the composite children of this node onto `stack`, leaving leaves in their place.
    fn detach_children(&mut self, stack: &mut Vec<Regex>) {
        let mut detach = |child: &mut Box<Regex>| {
            if matches!(
                child.as_ref(),
                Regex::Concat(..) | Regex::Union(..) | Regex::Star(_)
            ) {
                stack.push(std::mem::replace(child.as_mut(), Regex::Epsilon));
            }
        };

        match self {
            Regex::Literal(_) | Regex::Epsilon => {}
            Regex::Star(i) => detach(i),
            Regex::Concat(l, r) | Regex::Union(l, r) => {
                detach(l);
                detach(r);
            }
        }
    }
}

// the derived drop glue recurses once per level, which overflows on long patterns
impl Drop for Regex {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut regex) = stack.pop() {
            regex.detach_children(&mut stack);
        }
    }
}

// Prints in pattern syntax, with just enough parentheses to parse back to the same tree.
#[cfg(feature = "pretty-print")]
impl Display for Regex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Regex::Literal(c) => write!(f, "{c}"),
            Regex::Epsilon => write!(f, "@"),
            Regex::Star(i) => match i.as_ref() {
                Regex::Literal(_) | Regex::Epsilon => write!(f, "{i}*"),
                _ => write!(f, "({i})*"),
            },
            Regex::Union(l, r) => match r.as_ref() {
                Regex::Union(_, _) => write!(f, "{l}|({r})"),
                _ => write!(f, "{l}|{r}"),
            },
            Regex::Concat(l, r) => {
                match l.as_ref() {
                    Regex::Union(_, _) => write!(f, "({l})")?,
                    _ => write!(f, "{l}")?,
                }
                match r.as_ref() {
                    Regex::Union(_, _) | Regex::Concat(_, _) => write!(f, "({r})"),
                    _ => write!(f, "{r}"),
                }
            }
        }
    }
}
