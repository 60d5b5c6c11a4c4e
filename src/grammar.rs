// Grammar of AST node variants
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

//! Line-oriented grammar describing the node variants of an AST.
//!
//! Each line of a grammar declares a single variant
//!   (a [`TypeSpec`])
//!   by name,
//!     followed by a colon and a comma-separated list of [`Field`]s,
//!     each of which is itself a name and type separated by a colon:
//!
//! ```text
//! # comment lines start with '#' and are ignored
//! Binary : left: Expr, operator: Token, right: Expr
//! Literal : value: Any?
//! ```
//!
//! Lines beginning with `#` are comments and blank lines are ignored.
//! The order of variants and of their fields is significant and is
//!   retained;
//!     it determines the order of declarations in generated output.
//!
//! Parsing is permissive:
//!   a line without a colon declares a variant with no fields,
//!   and a malformed field list produces malformed [`Field`]s rather than
//!     failing.
//! It is the job of [`Grammar::validate`] to reject what cannot produce
//!   sensible output.
//!
//! ```
//! use astgen::grammar::Grammar;
//!
//! let src = "# expressions\nBinary : left: Expr, right: Expr\nNil\n";
//! let grammar = Grammar::read(src.as_bytes()).unwrap();
//!
//! let names: Vec<_> = grammar.iter().map(|ty| ty.name()).collect();
//! assert_eq!(vec!["Binary", "Nil"], names);
//! assert_eq!(2, grammar.types()[0].fields().len());
//! assert!(grammar.types()[1].fields().is_empty());
//! ```

mod error;
mod reader;
pub mod trace;
mod validate;

pub use error::GrammarError;
pub use reader::GrammarReader;
pub(crate) use reader::strip_bom;

use crate::{global, span::Span};
use std::{
    fmt::{self, Display},
    io::BufRead,
};

/// A field of a [`TypeSpec`].
///
/// A field is a name and a type separated by a colon.
/// The type is everything after the first colon,
///   so that it may itself contain colons.
/// If there is no colon,
///   then the type is empty.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Field {
    name: String,
    ty: String,
    span: Span,
    name_span: Span,
}

impl Field {
    /// Parse a field from `segment`,
    ///   which must be a slice of the grammar line `src`.
    pub fn parse(line: u32, src: &str, segment: &str) -> Self {
        let segment = segment.trim();

        let (name, ty) = match segment.split_once(global::NAME_DELIM) {
            Some((name, ty)) => (name.trim(), ty.trim()),
            None => (segment, ""),
        };

        Self {
            name: name.into(),
            ty: ty.into(),
            span: Span::within(line, src, segment),
            name_span: Span::within(line, src, name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Span of the entire field declaration.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn name_span(&self) -> Span {
        self.name_span
    }
}

impl Display for Field {
    /// Render the field as a declaration `name: Type`,
    ///   or simply `name` if it has no type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty.as_str() {
            "" => write!(f, "{}", self.name),
            ty => write!(f, "{}: {}", self.name, ty),
        }
    }
}

/// A single node variant declared by a grammar line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TypeSpec {
    name: String,
    fields: Vec<Field>,
    span: Span,
    name_span: Span,
}

impl TypeSpec {
    /// Parse a grammar line.
    ///
    /// The line must not be a comment;
    ///   see [`GrammarReader`].
    pub fn parse(line: u32, src: &str) -> Self {
        let (name, fields) = match src.split_once(global::NAME_DELIM) {
            Some((name, rest)) => (name.trim(), split_fields(rest.trim())),
            None => (src.trim(), vec![]),
        };

        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|segment| Field::parse(line, src, segment))
                .collect(),
            span: Span::line_of(line, src),
            name_span: Span::within(line, src, name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Span of the entire grammar line.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn name_span(&self) -> Span {
        self.name_span
    }
}

/// Split a field list on [`global::FIELD_DELIM`],
///   ignoring delimiters nested within any of
///   [`global::NESTING_DELIMS`].
///
/// An empty list produces no segments,
///   but empty segments between delimiters are retained so that they may
///   be reported.
/// The `>` of a function type arrow `->` does not close a bracket.
/// Unbalanced brackets are not an error;
///   a stray closing bracket is ignored and an unclosed bracket will
///   swallow the remainder of the list into a single segment.
fn split_fields(list: &str) -> Vec<&str> {
    if list.is_empty() {
        return vec![];
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = None;

    for (i, c) in list.char_indices() {
        let after = prev.replace(c);

        match c {
            '>' if after == Some(global::ARROW_PREFIX) => (),
            c if global::NESTING_DELIMS.iter().any(|(open, _)| *open == c) => {
                depth += 1
            }
            c if global::NESTING_DELIMS.iter().any(|(_, close)| *close == c) => {
                depth = depth.saturating_sub(1)
            }
            global::FIELD_DELIM if depth == 0 => {
                segments.push(&list[start..i]);
                start = i + c.len_utf8();
            }
            _ => (),
        }
    }

    segments.push(&list[start..]);
    segments
}

/// An ordered set of [`TypeSpec`]s,
///   in the order they were declared.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Grammar {
    types: Vec<TypeSpec>,
}

impl Grammar {
    pub fn new(types: Vec<TypeSpec>) -> Self {
        Self { types }
    }

    /// Read an entire grammar,
    ///   stopping at the first error.
    pub fn read<R: BufRead>(src: R) -> Result<Self, GrammarError> {
        GrammarReader::new(src)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeSpec> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check that the grammar can produce sensible output.
    ///
    /// All problems are reported,
    ///   not just the first.
    /// See [`GrammarError`] for what is considered to be a problem.
    pub fn validate(&self) -> Result<(), Vec<GrammarError>> {
        validate::validate(self)
    }
}

impl FromIterator<TypeSpec> for Grammar {
    fn from_iter<I: IntoIterator<Item = TypeSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Grammar {
    type Item = &'a TypeSpec;
    type IntoIter = std::slice::Iter<'a, TypeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

#[cfg(test)]
mod test;
