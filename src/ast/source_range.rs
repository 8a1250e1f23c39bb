use std::fmt;

/// A span of source text, 1-based. Line 0 means the node was not produced
/// from source (built by hand) and has no useful location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRange {
    pub file: Option<String>,
    pub begin_line: u32,
    pub begin_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceRange {
    pub fn new(file: Option<&str>, begin_line: u32, begin_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            file: file.map(str::to_string),
            begin_line,
            begin_column,
            end_line,
            end_column,
        }
    }

    /// A single-position range.
    pub fn point(file: Option<&str>, line: u32, column: u32) -> Self {
        Self::new(file, line, column, line, column)
    }

    pub fn is_known(&self) -> bool {
        self.begin_line > 0
    }

    /// Range from the start of `self` to the end of `other`.
    pub fn to(&self, other: &SourceRange) -> SourceRange {
        SourceRange {
            file: self.file.clone(),
            begin_line: self.begin_line,
            begin_column: self.begin_column,
            end_line: other.end_line,
            end_column: other.end_column,
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.begin_line, self.begin_column),
            None => write!(f, "{}:{}", self.begin_line, self.begin_column),
        }
    }
}
