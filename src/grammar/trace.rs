// Grammar reader tracing
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

//! Tracing for grammar reading.
//!
//! This provides human-readable traces on standard error any time a line
//!   is read from a grammar.
//! These traces are provided automatically when `cfg(test)`,
//!   which means that they are automatically included in the output of any
//!   test failure.
//!
//! Outside of tests,
//!   this can be enabled at build time using the `grammar-trace-stderr`
//!   feature flag
//!     (`cargo build --features grammar-trace-stderr`).
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to parse them since the format is subject to change without
//!   notice.

use super::TypeSpec;

/// Trace used by [`GrammarReader`](super::GrammarReader) unless another
///   is requested.
#[cfg(not(any(test, feature = "grammar-trace-stderr")))]
pub type DefaultTrace = VoidTrace;

/// Trace used by [`GrammarReader`](super::GrammarReader) unless another
///   is requested.
#[cfg(any(test, feature = "grammar-trace-stderr"))]
pub type DefaultTrace = HumanReadableTrace;

pub trait GrammarTrace: Default {
    /// Trace a line that was skipped because it is a comment or is blank.
    ///
    /// There is no means to return an error and a failure to output the
    ///   trace should not interrupt processing.
    fn trace_skip(&mut self, line: u32, src: &str);

    /// Trace a line that was parsed into a [`TypeSpec`].
    ///
    /// There is no means to return an error and a failure to output the
    ///   trace should not interrupt processing.
    fn trace_type(&mut self, line: u32, src: &str, ty: &TypeSpec);
}

/// Perform no tracing.
///
/// This is used by default for non-test builds.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl GrammarTrace for VoidTrace {
    fn trace_skip(&mut self, _line: u32, _src: &str) {
        // Do nothing at all.
    }

    fn trace_type(&mut self, _line: u32, _src: &str, _ty: &TypeSpec) {
        // Do nothing at all.
    }
}

/// Human-readable [`GrammarTrace`].
///
/// See [module-level](super) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl HumanReadableTrace {
    fn trace_cfg_note() {
        #[allow(unused_variables)]
        let cfg = ""; // so that this compiles without matching cfg
        #[cfg(feature = "grammar-trace-stderr")]
        #[allow(unused_variables)]
        let cfg = "feature = \"grammar-trace-stderr\"";
        #[cfg(test)] // takes precedence if both are set
        let cfg = "test";
        eprint!(
            "= note: this trace was output as a debugging aid \
                because `cfg({cfg})`.\n\n",
        );
    }
}

impl GrammarTrace for HumanReadableTrace {
    fn trace_skip(&mut self, line: u32, src: &str) {
        eprint!(
            "\
[GrammarReader] (line {line})
| ==> skipped: {src:?}
|\n"
        );

        Self::trace_cfg_note();
    }

    fn trace_type(&mut self, line: u32, src: &str, ty: &TypeSpec) {
        eprint!(
            "\
[GrammarReader] (line {line})
| ==> src: {src}
|
| ==> type `{name}` with {n} field(s)
|  |  {ty:?}
|\n",
            name = ty.name(),
            n = ty.fields().len(),
        );

        Self::trace_cfg_note();
    }
}
