// Global configuration
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

//! System-wide static configuration.
//!
//! This module provides a system-wide configuration.
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as requirements
//!   change.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

/// Comment written as the very first line of every generated file.
///
/// This exists so that nobody edits generated output by hand only to have
///   their changes clobbered the next time the grammar is compiled.
pub const GENERATED_HEADER: &str =
    "// THIS FILE IS AUTO GENERATED. SEE generate_ast";

/// A single level of indentation in generated output.
///
/// Generated classes are nested within the base class,
///   so most output sits between one and three levels deep.
pub const INDENT: &str = "  ";

/// First character of a grammar line that is to be ignored entirely.
pub const COMMENT_PREFIX: char = '#';

/// Separates a type name from its field list,
///   and a field name from its type.
pub const NAME_DELIM: char = ':';

/// Separates fields within a field list.
pub const FIELD_DELIM: char = ',';

/// Pairs of brackets within which [`FIELD_DELIM`] does not separate
///   fields.
///
/// This allows for types like `Map<String, Expr>`.
pub const NESTING_DELIMS: [(char, char); 3] =
    [('<', '>'), ('(', ')'), ('[', ']')];

/// Character preceding `>` in a function type arrow (`(A) -> B`),
///   where the `>` is not a closing bracket.
pub const ARROW_PREFIX: char = '-';

/// Byte order mark that some editors write at the start of a UTF-8 file.
///
/// It is not part of the first line of a grammar.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
