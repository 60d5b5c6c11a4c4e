// AST source emitter
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

//! Emit Kotlin source for an AST class hierarchy from a [`Grammar`].
//!
//! The generated source consists of an abstract base class that nests
//!
//!   1. a `Visitor<R>` interface with one `visit` method per variant;
//!   2. one class per variant with its fields,
//!        a constructor,
//!        and an `accept` method that dispatches to the variant's own
//!        `visit` method; and
//!   3. the abstract `accept` method that every variant overrides.
//!
//! This is the visitor pattern:
//!   each variant's `accept` selects a method based on both the type of the
//!   visitor and the type of the variant
//!     (double dispatch).
//!
//! The name of each `visit` method is derived from both the variant and
//!   the base class
//!     (see [`visit_method`]),
//!   so that a single visitor may implement visitors of multiple
//!     hierarchies without conflict.
//!
//! Output is written in a single pass and is fully determined by its
//!   inputs.
//!
//! ```
//! use astgen::{emit::{emit_ast, BaseName}, grammar::Grammar};
//!
//! let grammar = Grammar::read("Literal : value: Any?".as_bytes()).unwrap();
//! let base = BaseName::new("Expr").unwrap();
//!
//! let mut out = Vec::new();
//! emit_ast(&mut out, &base, &grammar).unwrap();
//!
//! let src = String::from_utf8(out).unwrap();
//! assert!(src.contains("    fun visitLiteralExpr (expr: Literal) : R?\n"));
//! assert!(src.contains("  class Literal : Expr {\n"));
//! ```

use crate::{
    fmt::{CommaList, ListDisplayWrapper, Raw},
    global,
    grammar::{Grammar, TypeSpec},
};
use std::{
    fmt::{self, Display},
    io::{self, Write},
};

/// Name of the abstract base class of the hierarchy.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BaseName {
    name: String,
    param: String,
}

impl BaseName {
    /// Create a base name,
    ///   or [`None`] if `name` is not an identifier.
    ///
    /// The name is used verbatim as a class name and as part of each
    ///   visitor method name,
    ///     so it must begin with a letter or underscore and contain only
    ///     letters, digits, and underscores.
    /// Surrounding whitespace is ignored.
    pub fn new<S: Into<String>>(name: S) -> Option<Self> {
        let name = name.into().trim().to_string();

        match is_ident(&name) {
            false => None,
            true => Some(Self {
                param: name.to_lowercase(),
                name,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Name of the parameter of each `visit` method,
    ///   which is the lowercase form of the base name
    ///     (e.g. `Expr` becomes `expr`).
    pub fn param(&self) -> &str {
        &self.param
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl Display for BaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Name of the visitor method for the variant `ty`.
///
/// This is `visit` followed by the name of the variant and then the name
///   of the base class,
///     e.g. `visitBinaryExpr`.
/// Names are unique provided that variant names are unique.
pub fn visit_method(ty: &TypeSpec, base: &BaseName) -> String {
    format!("visit{}{}", ty.name(), base)
}

/// Emit the complete source for `grammar` into `sink`.
pub fn emit_ast<W: Write>(
    sink: &mut W,
    base: &BaseName,
    grammar: &Grammar,
) -> io::Result<()> {
    Emitter::new(sink, base).emit(grammar)
}

/// Writes generated source line by line,
///   indenting each line by [`global::INDENT`] per level of nesting.
pub struct Emitter<'a, W: Write> {
    sink: &'a mut W,
    base: &'a BaseName,
}

impl<'a, W: Write> Emitter<'a, W> {
    pub fn new(sink: &'a mut W, base: &'a BaseName) -> Self {
        Self { sink, base }
    }

    /// Emit the base class,
    ///   nesting the visitor interface and each variant within it.
    ///
    /// Variants are emitted in grammar order.
    pub fn emit(&mut self, grammar: &Grammar) -> io::Result<()> {
        let base = self.base;

        self.line(0, global::GENERATED_HEADER)?;
        self.line(0, format_args!("abstract class {base} {{"))?;

        self.emit_visitor(grammar)?;

        for ty in grammar {
            self.emit_type(ty)?;
        }

        self.line(1, "abstract fun<R> accept(visitor: Visitor<R>) : R?")?;
        self.line(0, "}")
    }

    /// Emit the `Visitor<R>` interface with one method per variant.
    pub fn emit_visitor(&mut self, grammar: &Grammar) -> io::Result<()> {
        let base = self.base;

        self.line(1, "interface Visitor<R> {")?;

        for ty in grammar {
            self.line(
                2,
                format_args!(
                    "fun {} ({}: {}) : R?",
                    visit_method(ty, base),
                    base.param(),
                    ty.name(),
                ),
            )?;
        }

        self.line(1, "}")?;
        self.blank()
    }

    /// Emit the class for a single variant.
    ///
    /// The constructor takes each field in declaration order and assigns
    ///   it to the field of the same name.
    pub fn emit_type(&mut self, ty: &TypeSpec) -> io::Result<()> {
        let base = self.base;
        let fields = ty.fields();

        self.line(1, format_args!("class {} : {base} {{", ty.name()))?;

        for field in fields {
            self.line(2, format_args!("val {field}"))?;
        }

        self.line(
            2,
            format_args!("constructor({}) {{", CommaList::<Raw>::wrap(fields)),
        )?;

        for field in fields {
            let name = field.name();
            self.line(3, format_args!("this.{name} = {name}"))?;
        }

        self.line(2, "}")?;
        self.blank()?;

        // NB: this line ends in a space.
        self.line(2, "override fun<R> accept(visitor: Visitor<R>) : R? { ")?;
        self.line(
            3,
            format_args!("return visitor.{}(this)", visit_method(ty, base)),
        )?;
        self.line(2, "}")?;

        self.line(1, "}")?;
        self.blank()
    }

    fn line<T: Display>(&mut self, depth: usize, text: T) -> io::Result<()> {
        for _ in 0..depth {
            self.sink.write_all(global::INDENT.as_bytes())?;
        }

        write!(self.sink, "{text}\n")
    }

    fn blank(&mut self) -> io::Result<()> {
        self.sink.write_all(b"\n")
    }
}
