// Diagnostic system
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

//! Line-annotated reports of problems found in a grammar.
//!
//! An error that can point at the grammar implements [`Diagnostic`],
//!   describing itself as a list of [`AnnotatedSpan`]s.
//! A [`Reporter`] then looks up each span in the grammar and renders the
//!   offending lines with the span underlined:
//!
//! ```text
//! error: duplicate field `left` in type `Binary`
//!   --> expr.grammar:3:22
//!    |
//!  3 | Binary : left: Expr, left: Token
//!    |                      ^^^^ error: `left` declared again here
//!   --> expr.grammar:3:10
//!    |
//!  3 | Binary : left: Expr, left: Token
//!    |          ---- note: `left` first declared here
//! ```

mod report;
mod resolver;

pub use report::{Report, Reporter, VisualReporter};
pub use resolver::{
    BufSpanResolver, FsSpanResolver, SpanResolver, SpanResolverError,
};

use std::{borrow::Cow, error::Error, fmt, fmt::Display};

use crate::span::Span;

/// An error that can be located within a grammar.
pub trait Diagnostic: Error + Sized {
    /// Spans of the grammar involved in this error,
    ///   in the order they should be shown.
    ///
    /// An empty list renders only the message of the error.
    fn describe(&self) -> Vec<AnnotatedSpan>;
}

/// Severity of a report or of a single span within it.
///
/// Ordered from most to least severe.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
#[repr(u8)]
pub enum Level {
    /// The grammar cannot be used as written.
    #[default]
    Error = 1,

    /// Context for another span,
    ///   such as the first of two conflicting declarations.
    Note,

    /// A suggested fix.
    Help,
}

impl Level {
    /// Character repeated beneath a span of this level.
    fn marker(&self) -> char {
        match self {
            Level::Error => '^',
            Level::Note | Level::Help => '-',
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// Text shown alongside a span.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Label<'a>(Cow<'a, str>);

impl<'a> Display for Label<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'a> From<String> for Label<'a> {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl<'a> From<&'a str> for Label<'a> {
    fn from(s: &'a str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

/// A [`Span`] with its [`Level`] and an optional [`Label`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AnnotatedSpan<'l>(pub Span, pub Level, pub Option<Label<'l>>);

impl<'l> AnnotatedSpan<'l> {
    /// Follow this span with a [`Level::Help`] label on the same span.
    ///
    /// The reporter renders both beneath a single copy of the line.
    pub fn with_help<L: Into<Label<'l>>>(
        self,
        label: L,
    ) -> [AnnotatedSpan<'l>; 2] {
        let span = self.0;
        [self, span.help(label)]
    }
}

impl<'l> From<AnnotatedSpan<'l>> for Vec<AnnotatedSpan<'l>> {
    fn from(x: AnnotatedSpan<'l>) -> Self {
        vec![x]
    }
}

/// Shorthand for producing [`AnnotatedSpan`]s from anything that converts
///   into a [`Span`].
pub trait Annotate: Sized {
    fn annotate(self, level: Level, label: Option<Label>) -> AnnotatedSpan;

    fn error<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedSpan<'l> {
        self.annotate(Level::Error, Some(label.into()))
    }

    fn note<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedSpan<'l> {
        self.annotate(Level::Note, Some(label.into()))
    }

    fn help<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedSpan<'l> {
        self.annotate(Level::Help, Some(label.into()))
    }
}

impl<S: Into<Span>> Annotate for S {
    fn annotate(self, level: Level, label: Option<Label>) -> AnnotatedSpan {
        AnnotatedSpan(self.into(), level, label)
    }
}
