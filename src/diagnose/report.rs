// Diagnostic system rendering
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

//! Rendering of diagnostic information.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines,
//     rather than using both.

use super::{
    resolver::{ResolvedSpan, SpanResolver, SpanResolverError},
    AnnotatedSpan, Diagnostic, Label, Level,
};
use crate::span::Span;
use std::fmt::{self, Display};

pub trait Reporter {
    /// Render diagnostic report.
    ///
    /// The provided [`Report`] implements [`Display`].
    ///
    /// Please be mindful of where this report is being rendered to
    ///   (via [`Display`]).
    /// If rendering to a standard stream,
    ///   it is a good idea to buffer the entire report before flushing,
    ///     otherwise the report may become interleaved with the output of
    ///     other concurrent processes
    ///       (e.g. if invoked using `make -jN`).
    ///
    /// This method _does not return [`Result`]_ and should never fail.
    /// The report absorbs errors during processing and renders those errors
    ///   to the report itself,
    ///     ensuring both that the user is made aware of the problem
    ///     and that we're not inadvertently suppressing the actual
    ///       diagnostic messages that were requested.
    fn render<'d, D: Diagnostic>(&mut self, diagnostic: &'d D)
        -> Report<'d, D>;

    /// Number of reports of level [`Level::Error`] rendered thus far.
    fn error_count(&self) -> usize;
}

/// Render diagnostic report in a highly visual way.
///
/// This report is modeled after Rust's default error reporting,
///   most notable for including the grammar line associated with each
///   span and underlining the span itself.
pub struct VisualReporter<R: SpanResolver> {
    resolver: R,
    error_count: usize,
}

impl<R: SpanResolver> VisualReporter<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            error_count: 0,
        }
    }
}

impl<R: SpanResolver> Reporter for VisualReporter<R> {
    fn render<'d, D: Diagnostic>(
        &mut self,
        diagnostic: &'d D,
    ) -> Report<'d, D> {
        let ctx = self.resolver.context();

        let mut report = Report::empty(diagnostic);

        for AnnotatedSpan(span, level, olabel) in diagnostic.describe() {
            let line = self.resolver.resolve(span);

            report.push(Section {
                ctx: ctx.clone(),
                span,
                line,
                labels: vec![(level, olabel)],
            });
        }

        if report.level() == Level::Error {
            self.error_count += 1;
        }

        report
    }

    fn error_count(&self) -> usize {
        self.error_count
    }
}

#[derive(Debug)]
pub struct Report<'d, D: Diagnostic> {
    msg: &'d D,
    secs: Vec<Section<'d>>,
    level: Option<Level>,
}

impl<'d, D: Diagnostic> Report<'d, D> {
    fn empty(msg: &'d D) -> Self {
        Self {
            msg,
            secs: Vec::new(),
            level: None,
        }
    }

    /// Most severe level of any section of the report,
    ///   defaulting to [`Level::Error`] for reports without sections.
    pub fn level(&self) -> Level {
        self.level.unwrap_or_default()
    }

    /// Add a section to the report,
    ///   squashing it into the previous section if they describe the same
    ///   [`Span`].
    ///
    /// Non-adjacent sections are never squashed,
    ///   since reports ought to be able to revisit previous spans.
    fn push(&mut self, sec: Section<'d>) {
        let level = sec.level();
        self.level = Some(self.level.map_or(level, |prev| prev.min(level)));

        match self.secs.last_mut() {
            Some(prev) if prev.span == sec.span => {
                prev.labels.extend(sec.labels)
            }
            _ => self.secs.push(sec),
        }
    }
}

impl<'d, D: Diagnostic> Display for Report<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{level}: {msg}\n", level = self.level(), msg = self.msg)?;
        self.secs.iter().try_for_each(|sec| sec.fmt(f))
    }
}

/// A section of a [`Report`] describing a [`Span`].
#[derive(Debug)]
struct Section<'d> {
    ctx: String,
    span: Span,
    line: Result<ResolvedSpan, SpanResolverError>,
    labels: Vec<(Level, Option<Label<'d>>)>,
}

impl<'d> Section<'d> {
    fn level(&self) -> Level {
        self.labels
            .iter()
            .map(|(level, _)| *level)
            .min()
            .unwrap_or_default()
    }
}

impl<'d> Display for Section<'d> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.line {
            Ok(rspan) => {
                let line_num = rspan.span.line().to_string();
                let gutter = " ".repeat(line_num.len());

                write!(
                    f,
                    "  --> {}:{}:{}\n",
                    self.ctx,
                    line_num,
                    rspan.col_num()
                )?;
                write!(f, " {gutter} |\n")?;
                write!(f, " {line_num} | {}\n", rspan.text)?;

                let pad = rspan.pad();

                for (level, olabel) in self.labels.iter() {
                    let marks =
                        level.marker().to_string().repeat(rspan.width());

                    write!(f, " {gutter} | {pad}{marks}")?;

                    if let Some(label) = olabel {
                        write!(f, " {level}: {label}")?;
                    }

                    write!(f, "\n")?;
                }
            }

            // The diagnostic must never be masked by our own failure;
            //   fall back to the raw span data.
            Err(e) => {
                write!(f, "  --> {}", self.ctx)?;

                if self.span.is_known() {
                    write!(f, ":{}", self.span)?;
                }

                write!(f, "\n")?;

                if !matches!(e, SpanResolverError::Unknown) {
                    write!(
                        f,
                        "  = help: an error occurred while trying to look \
                           up information about this span: {e}\n"
                    )?;
                }

                for (level, olabel) in self.labels.iter() {
                    if let Some(label) = olabel {
                        write!(f, "  = {level}: {label}\n")?;
                    }
                }
            }
        }

        Ok(())
    }
}
