// Grammar reader
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

//! Read [`TypeSpec`]s from a grammar source.

use super::{
    trace::{DefaultTrace, GrammarTrace},
    GrammarError, TypeSpec,
};
use crate::global;
use std::io::{BufRead, Lines};

/// Lazily read [`TypeSpec`]s from a grammar,
///   one per non-comment, non-blank line.
///
/// Types are yielded in the order that they appear in the source.
/// Reading stops after the first I/O error.
///
/// ```
/// use astgen::grammar::GrammarReader;
///
/// let src = "# comment\n\nLiteral : value: Any?\n";
/// let types = GrammarReader::new(src.as_bytes())
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// assert_eq!(1, types.len());
/// assert_eq!("Literal", types[0].name());
/// assert_eq!(3, types[0].span().line());
/// ```
pub struct GrammarReader<R: BufRead, T: GrammarTrace = DefaultTrace> {
    lines: Lines<R>,
    line: u32,
    failed: bool,
    trace: T,
}

impl<R: BufRead> GrammarReader<R> {
    pub fn new(src: R) -> Self {
        Self::with_trace(src)
    }
}

impl<R: BufRead, T: GrammarTrace> GrammarReader<R, T> {
    /// Create a reader using a specific [`GrammarTrace`].
    pub fn with_trace(src: R) -> Self {
        Self {
            lines: src.lines(),
            line: 0,
            failed: false,
            trace: T::default(),
        }
    }

    /// Number of lines read thus far,
    ///   including comments and blank lines.
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Remove a leading [`global::BYTE_ORDER_MARK`] from the first line.
pub(crate) fn strip_bom(src: String) -> String {
    match src.strip_prefix(global::BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => src,
    }
}

/// Whether a grammar line declares nothing.
fn is_ignored(src: &str) -> bool {
    src.starts_with(global::COMMENT_PREFIX) || src.trim().is_empty()
}

impl<R: BufRead, T: GrammarTrace> Iterator for GrammarReader<R, T> {
    type Item = Result<TypeSpec, GrammarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let result = self.lines.next()?;
            self.line += 1;

            let src = match result {
                Ok(src) if self.line == 1 => strip_bom(src),
                Ok(src) => src,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(GrammarError::Io(e, self.line)));
                }
            };

            if is_ignored(&src) {
                self.trace.trace_skip(self.line, &src);
                continue;
            }

            let ty = TypeSpec::parse(self.line, &src);
            self.trace.trace_type(self.line, &src, &ty);

            return Some(Ok(ty));
        }
    }
}
