//! A trait that can provide the [TextSpan] of the complete context of a syntax node

use std::fmt::{Debug, Display, Formatter};
use std::path::Path;
use std::sync::Arc;

/// A trait that can provide the [TextSpan] of the complete context of a syntax node
pub trait Spanned {
    fn span(&self) -> TextSpan;
}

/// Identifies a source unit. Cheap to clone, compared by path text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Arc<str>);

impl FileId {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    /// Gets the path text of this file
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FileId({:?})", self.as_str())
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&String> for FileId {
    fn from(value: &String) -> Self {
        Self::new(value)
    }
}

impl From<&Path> for FileId {
    fn from(value: &Path) -> Self {
        Self::new(value.to_string_lossy())
    }
}

/// A half-open byte range `[start, end)` within one source file.
///
/// `line` is 1-based and `line_start` is the byte offset where that line begins, so the column
/// of the span is `start - line_start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextSpan {
    file: FileId,
    line: u32,
    line_start: usize,
    start: usize,
    end: usize,
}

impl TextSpan {
    /// Creates a new span.
    ///
    /// # Panics
    /// Panics if `line_start <= start <= end` does not hold.
    pub fn new(file: FileId, line: u32, line_start: usize, start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {start} is after its end {end}");
        assert!(
            line_start <= start,
            "span start {start} is before the start of its line {line_start}"
        );
        Self {
            file,
            line,
            line_start,
            start,
            end,
        }
    }

    /// Gets a zero-width span directly after this span
    pub fn end_span(&self) -> Self {
        Self {
            file: self.file.clone(),
            line: self.line,
            line_start: self.line_start,
            start: self.end,
            end: self.end,
        }
    }

    /// Creates a span that encompasses both, keeping the line information of whichever starts
    /// first. Returns `None` if the spans are from different files.
    pub fn join(&self, other: &Self) -> Option<Self> {
        if self.file != other.file {
            return None;
        }
        let first = if self.start <= other.start { self } else { other };
        Some(Self {
            file: self.file.clone(),
            line: first.line,
            line_start: first.line_start,
            start: first.start,
            end: self.end.max(other.end),
        })
    }

    #[inline]
    pub fn file(&self) -> &FileId {
        &self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// 0-based column of the first byte of the span
    #[inline]
    pub fn column(&self) -> usize {
        self.start - self.line_start
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for TextSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column())
    }
}

impl Spanned for TextSpan {
    fn span(&self) -> TextSpan {
        self.clone()
    }
}
