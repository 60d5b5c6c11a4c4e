// Display formatting utilities
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

//! Typed formatting helpers.
//!
//! These types create composable formatters for use with [`Display`].
//! Whereas [`Display`] operates on data owned by the type implementing it,
//!   these formatters compose into functions that operate on data provided
//!   _to_ it.
//! Consequently,
//!   formatters are simply types,
//!   and writes can be streamed just as they are with [`Display`].
//!
//! There are two types of wrappers:
//!
//!   - [`DisplayWrapper`] formats objects as atoms; and
//!   - [`ListDisplayWrapper`] maps a [`DisplayWrapper`] to each of its
//!       items as atoms,
//!         where the specific wrapper used depends on the position of the
//!         item within the list and the properties of the list itself.
//!
//! Static strings are provided to wrappers as types implementing
//!   [`StaticStr`],
//!     since string slices cannot be used as const generics on stable
//!     Rust.
//!
//! For example:
//!
//! ```
//! # use astgen::fmt::*;
//! assert_eq!(
//!     AndConjList::<TtQuote>::wrap(&["left", "operator", "right"])
//!         .to_string(),
//!     "`left`, `operator`, and `right`",
//! );
//!
//! assert_eq!(
//!     CommaList::<Raw>::wrap(&["left: Expr", "right: Expr"]).to_string(),
//!     "left: Expr, right: Expr",
//! );
//! ```
//!
//! This is used both for generated code,
//!   where lists are separated by commas,
//!   and for diagnostic messages,
//!     where lists are written in English.

use std::{
    fmt::{Display, Formatter, Result},
    marker::PhantomData,
};

/// A string known at compile time,
///   represented as a type.
pub trait StaticStr {
    const STR: &'static str;
}

/// Declare unit types implementing [`StaticStr`].
macro_rules! static_strs {
    ($($(#[$attr:meta])* $name:ident = $s:literal;)*) => {
        $(
            $(#[$attr])*
            pub struct $name;

            impl StaticStr for $name {
                const STR: &'static str = $s;
            }
        )*
    };
}

static_strs! {
    /// A single backtick.
    Backtick = "`";
    /// A single space.
    Space = " ";
    /// Comma followed by a space.
    CommaSp = ", ";
    /// Conjunction "and".
    And = "and";
}

/// Wrapper for a [`Display`]-able type.
///
/// See the [module-level documentation](super) for more information.
pub trait DisplayWrapper {
    /// Transform inner data and output using the provided [`Formatter`].
    ///
    /// If a [`Formatter`] is not available,
    ///   [`DisplayWrapper::wrap`] may be used to produce a [`Display`]-able
    ///   object instead.
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result;

    /// Associate data with a [`DisplayWrapper`] for rendering using
    ///   [`Display`].
    fn wrap<T: Display>(inner: T) -> Wrap<Self, T>
    where
        Self: Sized,
    {
        Wrap {
            inner,
            _phantom: PhantomData,
        }
    }
}

/// Wrapper with associated data.
///
/// This has the effect of creating an arbitrary [`Display`] implementation
///   for the wrapped data,
///     which will work well with [`format!`] and anything else that does
///     not have access to an explicit [`Formatter`].
pub struct Wrap<W: DisplayWrapper, T: Display> {
    inner: T,
    _phantom: PhantomData<W>,
}

impl<W: DisplayWrapper, T: Display> Display for Wrap<W, T> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        W::fmt(&self.inner, f)
    }
}

/// Echo data as-is without any wrapping.
///
/// This is primarily used at the root of a wrapper composition.
pub struct Raw;

impl DisplayWrapper for Raw {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        inner.fmt(f)
    }
}

/// Prefix data with a static [`str`].
///
/// See also [`Suffix`] and [`Delim`].
pub struct Prefix<P: StaticStr, W: DisplayWrapper>(PhantomData<(P, W)>);

impl<P: StaticStr, W: DisplayWrapper> DisplayWrapper for Prefix<P, W> {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        f.write_str(P::STR)?;
        W::fmt(inner, f)
    }
}

/// Suffix data with a static [`str`].
///
/// See also [`Prefix`] and [`Delim`].
pub struct Suffix<S: StaticStr, W: DisplayWrapper>(PhantomData<(S, W)>);

impl<S: StaticStr, W: DisplayWrapper> DisplayWrapper for Suffix<S, W> {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        W::fmt(inner, f)?;
        f.write_str(S::STR)
    }
}

/// Surround a value in delimiters.
///
/// See also [`Prefix`] and [`Suffix`].
pub type Delim<L, R, W> = Prefix<L, Suffix<R, W>>;

/// Denote text that would conventionally be delimited in a teletypewriter
///   font.
///
/// This produces a markdown-style quote using backticks.
///
/// NB: This does not defend against nested quotes,
///   so this is _not_ safe against format escapes.
pub type Tt<W> = Delim<Backtick, Backtick, W>;

/// Quote a raw value in backticks.
pub type TtQuote = Tt<Raw>;

/// Prefix with a single space.
pub type Sp<W> = Prefix<Space, W>;

/// Wrapper for a list that maps each element to a context-specific
///   [`DisplayWrapper`].
///
/// This uses the slice API for wrapping since [`Display`] takes objects by
///   non-mutable reference,
///     and so we cannot consume an iterator.
///
/// The associated types define the wrappers to use for items in various
///   positions depending on the length of the list.
pub trait ListDisplayWrapper {
    /// Wrapper to use when the list contains only a single item.
    type Single: DisplayWrapper;
    /// Wrapper for the first item in a multi-item list.
    type First: DisplayWrapper;
    /// Wrapper for all but the first and last items in a multi-item list.
    type Middle: DisplayWrapper;
    /// Wrapper for the last item of a list containing a pair of items.
    type LastOfPair: DisplayWrapper;
    /// Wrapper for the last item of a list containing more than two items.
    type LastOfMany: DisplayWrapper;

    /// Format a slice using the provided wrappers.
    ///
    /// An empty list produces no output.
    fn fmt<T: Display>(list: &[T], f: &mut Formatter) -> Result {
        let maxi = list.len().saturating_sub(1);

        for next in list.iter().enumerate() {
            match next {
                (0, x) if maxi == 0 => Self::Single::fmt(x, f)?,
                (0, x) => Self::First::fmt(x, f)?,
                (1, x) if maxi == 1 => Self::LastOfPair::fmt(x, f)?,
                (i, x) if maxi == i => Self::LastOfMany::fmt(x, f)?,
                (_, x) => Self::Middle::fmt(x, f)?,
            }
        }

        Ok(())
    }

    /// Associate data with a [`ListDisplayWrapper`] for rendering using
    ///   [`Display`].
    fn wrap<T: Display>(list: &[T]) -> ListWrap<Self, T>
    where
        Self: Sized,
    {
        ListWrap {
            list,
            _phantom: PhantomData,
        }
    }
}

/// Format each item of a slice using a [`DisplayWrapper`] formatter,
///   separated by a static string.
pub struct SepList<S: StaticStr, W: DisplayWrapper>(PhantomData<(S, W)>);

impl<S: StaticStr, W: DisplayWrapper> ListDisplayWrapper for SepList<S, W> {
    type Single = W;
    type First = W;
    type Middle = Prefix<S, W>;
    type LastOfPair = Prefix<S, W>;
    type LastOfMany = Prefix<S, W>;
}

/// A list separated by commas,
///   as in parameter lists of generated code.
pub type CommaList<W> = SepList<CommaSp, W>;

/// Format each item of a slice using a [`DisplayWrapper`] formatter,
///   outputting an English list with a serial comma and conjunctive term.
///
/// No formatting is done to a single item,
///   and the serial comma is omitted for only two items.
///
/// For example:
///   If we have a slice `[1, 2, 3]`,
///     this will output "1, 2, and 3".
///   If we have a slice `[1, 2]`,
///     it will omit the serial comma and output "1 and 2".
pub struct ConjList<C: StaticStr, W: DisplayWrapper>(PhantomData<(C, W)>);

impl<C: StaticStr, W: DisplayWrapper> ListDisplayWrapper for ConjList<C, W> {
    type Single = W;
    type First = W;
    type Middle = Prefix<CommaSp, W>;
    type LastOfPair = Sp<Prefix<C, Sp<W>>>;
    // Comma after the penultimate term (serial/Oxford comma).
    type LastOfMany = Prefix<CommaSp, Prefix<C, Sp<W>>>;
}

/// A list of values with a serial comma and the term "and" as a
///   conjunction between the penultimate and final items.
pub type AndConjList<W> = ConjList<And, W>;

/// List wrapper with associated data.
pub struct ListWrap<'a, W: ListDisplayWrapper, T: Display> {
    list: &'a [T],
    _phantom: PhantomData<W>,
}

impl<'a, W: ListDisplayWrapper, T: Display> Display for ListWrap<'a, W, T> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        W::fmt(self.list, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_and_suffix() {
        assert_eq!(Prefix::<Space, Raw>::wrap("foo").to_string(), " foo");
        assert_eq!(Suffix::<CommaSp, Raw>::wrap("foo").to_string(), "foo, ");
        assert_eq!(TtQuote::wrap("foo").to_string(), "`foo`");
    }

    #[test]
    fn comma_list() {
        assert_eq!(CommaList::<Raw>::wrap::<&str>(&[]).to_string(), "");
        assert_eq!(CommaList::<Raw>::wrap(&["a: A"]).to_string(), "a: A");
        assert_eq!(
            CommaList::<Raw>::wrap(&["a: A", "b: B", "c: C"]).to_string(),
            "a: A, b: B, c: C",
        );
    }

    #[test]
    fn conj_list() {
        assert_eq!(AndConjList::<Raw>::wrap(&["one"]).to_string(), "one");
        assert_eq!(
            AndConjList::<Raw>::wrap(&["toil", "trouble"]).to_string(),
            "toil and trouble",
        );
        assert_eq!(
            AndConjList::<TtQuote>::wrap(&["<", "(", "["]).to_string(),
            "`<`, `(`, and `[`",
        );
    }
}
