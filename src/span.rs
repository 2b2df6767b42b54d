//! Source positions and spans carried by every AST node.

use std::fmt;

/// A zero-based byte index plus one-based line/column, as produced by the lexer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    index: usize,
    line: usize,
    col: usize,
}

impl SourcePosition {
    /// Constructs a new position. `line` and `col` are zero-based on input and
    /// stored zero-based; use [`SourcePosition::line`] / [`SourcePosition::column`]
    /// for the one-based values GraphQL error locations report.
    pub fn new(index: usize, line: usize, col: usize) -> SourcePosition {
        SourcePosition { index, line, col }
    }

    /// The position at the very start of a source document.
    pub fn new_origin() -> SourcePosition {
        SourcePosition::new(0, 0, 0)
    }

    /// Advances this position by one column.
    pub fn advance_col(&mut self) {
        self.index += 1;
        self.col += 1;
    }

    /// Advances this position to the start of the next line.
    pub fn advance_line(&mut self) {
        self.index += 1;
        self.line += 1;
        self.col = 0;
    }

    /// Byte index into the source text.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based line number.
    pub fn line(&self) -> usize {
        self.line + 1
    }

    /// One-based column number.
    pub fn column(&self) -> usize {
        self.col + 1
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line(), self.column())
    }
}

/// A half-open `[start, end)` range of source positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl Span {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Span {
        Span { start, end }
    }

    /// A span of zero width at the origin, used for synthetically built nodes
    /// (test fixtures only — never emitted by a real parser).
    pub fn zero_width() -> Span {
        let pos = SourcePosition::new_origin();
        Span::new(pos.clone(), pos)
    }

    pub fn single_width(pos: &SourcePosition) -> Span {
        let mut end = pos.clone();
        end.advance_col();
        Span::new(pos.clone(), end)
    }
}

/// Pairs an AST item with the span of source text it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Spanning<T> {
    pub item: T,
    pub span: Span,
}

impl<T> Spanning<T> {
    pub fn new(item: T, span: Span) -> Spanning<T> {
        Spanning { item, span }
    }

    pub fn start_end(start: &SourcePosition, end: &SourcePosition, item: T) -> Spanning<T> {
        Spanning::new(item, Span::new(start.clone(), end.clone()))
    }

    pub fn zero_width(item: T) -> Spanning<T> {
        Spanning::new(item, Span::zero_width())
    }

    pub fn single_width(pos: &SourcePosition, item: T) -> Spanning<T> {
        Spanning::new(item, Span::single_width(pos))
    }

    /// Constructs a synthetic spanning value for nodes that have no source
    /// text of their own (hand-built test fixtures).
    pub fn unlocated(item: T) -> Spanning<T> {
        Spanning::zero_width(item)
    }

    pub fn start(&self) -> &SourcePosition {
        &self.span.start
    }

    pub fn end(&self) -> &SourcePosition {
        &self.span.end
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Spanning<U> {
        Spanning::new(f(self.item), self.span)
    }

    pub fn as_ref(&self) -> Spanning<&T> {
        Spanning::new(&self.item, self.span.clone())
    }
}

impl<T: fmt::Display> fmt::Display for Spanning<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}", self.item, self.span.start)
    }
}
