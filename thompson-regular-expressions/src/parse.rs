use crate::{ParseError, Regex};

/// How deeply groups may be nested before a pattern is rejected with
/// [`ParseError::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser over the grammar
///
/// ```text
/// union  := concat ('|' concat)*
/// concat := star+
/// star   := atom '*'*
/// atom   := '(' union ')' | '@' | <any other character>
/// ```
///
/// Each rule consumes input left to right without backtracking.
struct RegexParser {
    input: Vec<char>,
    position: usize,
    depth: usize,
}

impl RegexParser {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.peek();
        if next.is_some() {
            self.position += 1;
        }
        next
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn parse_union(&mut self) -> Result<Regex, ParseError> {
        let mut regex = self.parse_concat()?;
        // union is left-associative
        while self.eat('|') {
            let right = self.parse_concat()?;
            regex = Regex::union(regex, right);
        }
        Ok(regex)
    }

    fn parse_concat(&mut self) -> Result<Regex, ParseError> {
        let mut regex = self.parse_star()?;
        // a concatenation ends at the end of its group, or where a union starts
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let right = self.parse_star()?;
            regex = Regex::concat(regex, right);
        }
        Ok(regex)
    }

    fn parse_star(&mut self) -> Result<Regex, ParseError> {
        let atom = self.parse_atom()?;
        let mut starred = false;
        while self.eat('*') {
            starred = true;
        }
        Ok(if starred { Regex::star(atom) } else { atom })
    }

    fn parse_atom(&mut self) -> Result<Regex, ParseError> {
        let position = self.position;
        match self.bump() {
            None => Err(ParseError::MissingOperand { position }),
            Some('(') => {
                // every group costs a few stack frames
                if self.depth == MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        position,
                        limit: MAX_NESTING_DEPTH,
                    });
                }

                self.depth += 1;
                let inner = self.parse_union()?;
                self.depth -= 1;
                if self.eat(')') {
                    Ok(inner)
                } else {
                    // parse_union only stops at ')' or at the end of the input
                    Err(ParseError::UnclosedGroup {
                        open: position,
                        position: self.position,
                    })
                }
            }
            Some('@') => Ok(Regex::Epsilon),
            Some(found @ (')' | '|' | '*')) => {
                Err(ParseError::UnexpectedCharacter { position, found })
            }
            Some(c) => Ok(Regex::Literal(c)),
        }
    }

    fn finalize(self, regex: Regex) -> Result<Regex, ParseError> {
        match self.peek() {
            None => Ok(regex),
            Some(found) => Err(ParseError::TrailingInput {
                position: self.position,
                found,
            }),
        }
    }

    pub fn parse_regex(input: &str) -> Result<Regex, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyPattern);
        }

        let mut parser = RegexParser::new(input);
        let regex = parser.parse_union()?;
        parser.finalize(regex)
    }
}

pub(crate) fn parse(input: &str) -> Result<Regex, ParseError> {
    RegexParser::parse_regex(input)
}
