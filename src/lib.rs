// AST source generator
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

//! Generate the source of an AST class hierarchy from a line-oriented
//!   grammar.
//!
//! A [`grammar::Grammar`] is read from a file of node variants,
//!   optionally validated,
//!   and then emitted by [`emit`] as an abstract base class with a visitor
//!   interface and one class per variant.
//! Problems with a grammar are reported through the [`diagnose`] system,
//!   which renders the offending grammar lines.

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

pub mod diagnose;
pub mod emit;
pub mod fmt;
pub mod fs;
pub mod grammar;
pub mod span;
