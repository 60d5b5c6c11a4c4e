// Grammar errors
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

//! Errors produced while reading and validating a grammar.

use crate::{
    diagnose::{Annotate, AnnotatedSpan, Diagnostic},
    fmt::{DisplayWrapper, TtQuote},
    span::Span,
};
use std::{error::Error, fmt::Display, io};

/// An error reading or validating a grammar.
///
/// With the exception of [`GrammarError::Io`],
///   these errors are produced only by
///   [`Grammar::validate`](super::Grammar::validate);
///     reading a grammar is otherwise permissive.
#[derive(Debug)]
pub enum GrammarError {
    /// The grammar could not be read;
    ///   the line number is that of the line being read.
    Io(io::Error, u32),

    /// A line has a field list but nothing naming the type.
    EmptyTypeName(Span),

    /// A field list contains a field with nothing in it,
    ///   such as `a: A, , b: B` or a trailing comma.
    EmptyField { ty: String, span: Span },

    /// A field has a type but no name,
    ///   such as `: Expr`.
    MissingFieldName { ty: String, span: Span },

    /// A field has a name but no type.
    MissingFieldType {
        ty: String,
        field: String,
        span: Span,
    },

    /// A type is declared more than once.
    ///
    /// Type names determine visitor method names,
    ///   which would then conflict.
    DuplicateType {
        name: String,
        span: Span,
        first: Span,
    },

    /// A field is declared more than once within the same type.
    DuplicateField {
        ty: String,
        field: String,
        span: Span,
        first: Span,
    },
}

impl PartialEq for GrammarError {
    fn eq(&self, other: &Self) -> bool {
        use GrammarError::*;

        match (self, other) {
            // Hardly ideal,
            //   but io::Error does not implement PartialEq.
            (Io(a, la), Io(b, lb)) => a.kind() == b.kind() && la == lb,
            (EmptyTypeName(a), EmptyTypeName(b)) => a == b,
            (
                EmptyField { ty: ta, span: sa },
                EmptyField { ty: tb, span: sb },
            ) => ta == tb && sa == sb,
            (
                MissingFieldName { ty: ta, span: sa },
                MissingFieldName { ty: tb, span: sb },
            ) => ta == tb && sa == sb,
            (
                MissingFieldType {
                    ty: ta,
                    field: fa,
                    span: sa,
                },
                MissingFieldType {
                    ty: tb,
                    field: fb,
                    span: sb,
                },
            ) => ta == tb && fa == fb && sa == sb,
            (
                DuplicateType {
                    name: na,
                    span: sa,
                    first: xa,
                },
                DuplicateType {
                    name: nb,
                    span: sb,
                    first: xb,
                },
            ) => na == nb && sa == sb && xa == xb,
            (
                DuplicateField {
                    ty: ta,
                    field: fa,
                    span: sa,
                    first: xa,
                },
                DuplicateField {
                    ty: tb,
                    field: fb,
                    span: sb,
                    first: xb,
                },
            ) => ta == tb && fa == fb && sa == sb && xa == xb,
            _ => false,
        }
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use GrammarError::*;

        match self {
            Io(e, line) => {
                write!(f, "failed to read grammar at line {line}: {e}")
            }
            EmptyTypeName(_) => write!(f, "missing type name"),
            EmptyField { ty, .. } => {
                write!(f, "empty field in type {}", TtQuote::wrap(ty))
            }
            MissingFieldName { ty, .. } => {
                write!(f, "missing field name in type {}", TtQuote::wrap(ty))
            }
            MissingFieldType { ty, field, .. } => write!(
                f,
                "missing type for field {} of type {}",
                TtQuote::wrap(field),
                TtQuote::wrap(ty),
            ),
            DuplicateType { name, .. } => {
                write!(f, "duplicate type {}", TtQuote::wrap(name))
            }
            DuplicateField { ty, field, .. } => write!(
                f,
                "duplicate field {} in type {}",
                TtQuote::wrap(field),
                TtQuote::wrap(ty),
            ),
        }
    }
}

impl Error for GrammarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e, _) => Some(e),
            _ => None,
        }
    }
}

impl Diagnostic for GrammarError {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        use GrammarError::*;

        match self {
            // The line could not be read,
            //   so there is nothing to show.
            Io(..) => vec![],

            EmptyTypeName(span) => span
                .error("expected a type name before `:`")
                .with_help("types are declared as `Name : field: Type, ...`")
                .to_vec(),

            EmptyField { span, .. } => span
                .error("expected `name: Type` here")
                .with_help("remove the extra `,`")
                .to_vec(),

            MissingFieldName { span, .. } => span
                .error("expected a field name before `:`")
                .into(),

            MissingFieldType { field, span, .. } => span
                .error("this field has no type")
                .with_help(format!(
                    "fields are declared as {}",
                    TtQuote::wrap(format!("{field}: Type"))
                ))
                .to_vec(),

            DuplicateType { span, first, .. } => vec![
                span.error("declared again here"),
                first.note("first declared here"),
                span.help(
                    "type names must be unique since each determines the \
                       name of a visitor method",
                ),
            ],

            DuplicateField {
                field, span, first, ..
            } => vec![
                span.error(format!("{} declared again here", TtQuote::wrap(field))),
                first.note(format!("{} first declared here", TtQuote::wrap(field))),
            ],
        }
    }
}
