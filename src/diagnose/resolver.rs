// Diagnostic span resolver
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of astgen.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Resolve [`Span`]s into the source lines they describe.

use crate::{grammar::strip_bom, span::Span};
use std::{
    error::Error,
    fmt::{self, Display},
    fs,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Resolves [`Span`]s into source lines.
///
/// A [`Span`] contains only a line number and raw byte offsets gathered
///   during parsing.
/// Those can be used to go back to read the grammar to retrieve the line
///   that the span refers to,
///     so that it may be displayed alongside of the diagnostic message.
/// This is not done during parsing because this information is only useful
///   in a diagnostic context,
///     which is not the typical happy path.
pub trait SpanResolver {
    /// Name of the source that spans are resolved against,
    ///   for display in report headings.
    fn context(&self) -> String;

    /// Resolve the provided [`Span`] into its source line.
    fn resolve(
        &mut self,
        span: Span,
    ) -> Result<ResolvedSpan, SpanResolverError>;
}

/// A [`Span`] resolved to the text of its source line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ResolvedSpan {
    pub span: Span,
    pub text: String,
}

impl ResolvedSpan {
    /// 1-indexed column of the start of the span,
    ///   in characters.
    ///
    /// If the span does not begin on a character boundary,
    ///   the byte offset is used instead.
    pub fn col_num(&self) -> usize {
        let offset = self.span.offset() as usize;

        self.text
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset)
            + 1
    }

    /// Whitespace that aligns a marker beneath the start of the span.
    ///
    /// Tabs in the source line are retained so that the marker lines up
    ///   however the terminal chooses to expand them.
    pub fn pad(&self) -> String {
        let offset = self.span.offset() as usize;

        match self.text.get(..offset) {
            Some(prefix) => prefix
                .chars()
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect(),
            None => " ".repeat(offset),
        }
    }

    /// Width of the span in characters,
    ///   but never less than `1` so that empty spans remain visible.
    pub fn width(&self) -> usize {
        let start = self.span.offset() as usize;
        let end = start + self.span.len() as usize;

        self.text
            .get(start..end)
            .map(|s| s.chars().count())
            .unwrap_or(self.span.len() as usize)
            .max(1)
    }
}

/// Resolves spans by reading lines from a file on the filesystem.
///
/// The file is opened anew for each resolution,
///   since diagnostics are rare and the grammar reader has long since
///   closed its own handle.
#[derive(Debug)]
pub struct FsSpanResolver {
    path: PathBuf,
}

impl FsSpanResolver {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SpanResolver for FsSpanResolver {
    fn context(&self) -> String {
        self.path.display().to_string()
    }

    fn resolve(
        &mut self,
        span: Span,
    ) -> Result<ResolvedSpan, SpanResolverError> {
        let file = fs::File::open(&self.path)?;
        let lines = BufReader::new(file).lines();

        resolve_from(span, lines)
    }
}

/// Resolves spans against a source already held in memory.
#[derive(Debug)]
pub struct BufSpanResolver {
    name: String,
    src: String,
}

impl BufSpanResolver {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, src: S) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
        }
    }
}

impl SpanResolver for BufSpanResolver {
    fn context(&self) -> String {
        self.name.clone()
    }

    fn resolve(
        &mut self,
        span: Span,
    ) -> Result<ResolvedSpan, SpanResolverError> {
        resolve_from(span, self.src.lines().map(|l| Ok(l.to_string())))
    }
}

fn resolve_from<I>(
    span: Span,
    mut lines: I,
) -> Result<ResolvedSpan, SpanResolverError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let line = span.line();

    if line == 0 {
        return Err(SpanResolverError::Unknown);
    }

    match lines.nth(line as usize - 1) {
        // Offsets of the first line do not include a byte order mark.
        Some(text) if line == 1 => Ok(ResolvedSpan {
            span,
            text: strip_bom(text?),
        }),
        Some(text) => Ok(ResolvedSpan { span, text: text? }),
        None => Err(SpanResolverError::Eof { line }),
    }
}

/// An error occurring while attempting to resolve a [`Span`].
#[derive(Debug)]
pub enum SpanResolverError {
    Io(io::Error),

    /// The span does not refer to any location.
    Unknown,

    /// The source ended before reaching the requested line.
    Eof { line: u32 },
}

impl PartialEq for SpanResolverError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Hardly ideal,
            //   but io::Error does not implement PartialEq.
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Unknown, Self::Unknown) => true,
            (Self::Eof { line: a }, Self::Eof { line: b }) => a == b,
            _ => false,
        }
    }
}

impl Eq for SpanResolverError {}

impl From<io::Error> for SpanResolverError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for SpanResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Unknown => write!(f, "span has no known location"),
            Self::Eof { line } => {
                write!(f, "unexpected EOF while looking for line {line}")
            }
        }
    }
}

impl Error for SpanResolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
