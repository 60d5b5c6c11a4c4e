// Grammar source locations
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

//! Mapping to intervals of a grammar line.
//!
//! A [`Span`] identifies a line of a grammar file along with a byte
//!   interval within that line,
//!     representing where some grammar entity originated.
//! This underpins the [diagnostic system](crate::diagnose).
//!
//! Grammars are line-oriented and every entity lies within a single line,
//!   so a span does not need to be able to cross line boundaries.
//! The file itself is not part of the span;
//!   a grammar is read from exactly one file,
//!     and so that context is held by whatever renders the span.
//!
//! ```
//! use astgen::span::Span;
//!
//! let line = "Binary : left: Expr";
//! let span = Span::within(3, line, &line[9..13]);
//!
//! assert_eq!(3, span.line());
//! assert_eq!(9, span.offset());
//! assert_eq!(4, span.len());
//! ```
//!
//! Spans are small and freely copyable,
//!   and they order first by line and then by their offset within it.

use std::fmt::{self, Display};

/// A byte interval within a single line of a grammar file.
///
/// Line numbers are 1-indexed;
///   the line number `0` is reserved for [`UNKNOWN_SPAN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    line: u32,
    offset: u16,
    len: u16,
}

/// A span with no known location.
///
/// This is used when an error cannot be traced back to the grammar,
///   such as when the grammar could not be read at all.
pub const UNKNOWN_SPAN: Span = Span {
    line: 0,
    offset: 0,
    len: 0,
};

impl Span {
    /// Create a span from raw parts.
    pub const fn new(line: u32, offset: u16, len: u16) -> Self {
        Self { line, offset, len }
    }

    /// A span covering the entirety of `src`,
    ///   which is line number `line`.
    pub fn line_of(line: u32, src: &str) -> Self {
        Self::new(line, 0, clamp(src.len()))
    }

    /// A span covering `sub` within `src`,
    ///   which is line number `line`.
    ///
    /// `sub` must be a slice of `src` (as produced by e.g. [`str::trim`]
    ///   or [`str::split_once`]);
    ///     if it is not,
    ///     the span will cover the entire line instead.
    pub fn within(line: u32, src: &str, sub: &str) -> Self {
        let base = src.as_ptr() as usize;
        let start = sub.as_ptr() as usize;

        match start.checked_sub(base) {
            Some(offset) if offset + sub.len() <= src.len() => {
                Self::new(line, clamp(offset), clamp(sub.len()))
            }
            _ => Self::line_of(line, src),
        }
    }

    /// 1-indexed line number,
    ///   or `0` if unknown.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Byte offset of the start of the span within its line.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Whether the span covers no bytes.
    ///
    /// This is true for [`UNKNOWN_SPAN`],
    ///   but also for spans marking an empty region,
    ///     such as an empty field between two commas.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the span can be resolved to a location in the grammar.
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            0 => write!(f, "<unknown>"),
            line => write!(f, "{}:{}", line, self.offset as usize + 1),
        }
    }
}

/// Saturate lengths that do not fit in a span.
///
/// No sensible grammar line is anywhere near this long;
///   a saturated span still points to the correct line.
fn clamp(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
