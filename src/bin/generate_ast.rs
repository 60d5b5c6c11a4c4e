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

//! Generate the source of an AST class hierarchy from a grammar file.
//!
//! The generated source is written to standard output unless `--output`
//!   is given.
//! Nothing is written if the grammar fails validation.

extern crate astgen;

use astgen::{
    diagnose::{FsSpanResolver, Reporter, VisualReporter},
    emit::{emit_ast, BaseName},
    fmt::{AndConjList, DisplayWrapper, ListDisplayWrapper, TtQuote},
    fs::{File, PathFile},
    grammar::{Grammar, GrammarError},
};
use getopts::{Fail, Options};
use std::{
    env,
    error::Error,
    fmt::{self, Display, Write as _},
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Types of commands
#[derive(Debug, PartialEq)]
enum Command {
    Generate {
        base: BaseName,
        grammar: String,
        output: Option<String>,
        permissive: bool,
    },
    Usage,
}

/// Read, validate, and emit the grammar at `src_path`.
///
/// Output is not opened until the grammar has been validated,
///   so that a failure never leaves behind a partially written file.
fn generate(
    base: &BaseName,
    src_path: &str,
    dest_path: Option<&str>,
    permissive: bool,
) -> Result<(), GenerateError> {
    let mut file: PathFile<BufReader<fs::File>> = PathFile::open(src_path)?;
    let grammar = Grammar::read(&mut file)?;

    if !permissive {
        grammar
            .validate()
            .map_err(|errs| GenerateError::Invalid(file.path().into(), errs))?;
    }

    let result = match dest_path {
        Some(dest) => {
            write_to(BufWriter::new(fs::File::create(dest)?), base, &grammar)
        }
        None => write_to(BufWriter::new(io::stdout().lock()), base, &grammar),
    };

    Ok(result?)
}

fn write_to<W: Write>(
    mut fout: W,
    base: &BaseName,
    grammar: &Grammar,
) -> io::Result<()> {
    emit_ast(&mut fout, base, grammar)?;
    fout.flush()
}

/// Render each validation error against the grammar file at `src_path`.
///
/// Returns the number of errors that were reported.
fn report_invalid(
    src_path: &Path,
    errs: &[GrammarError],
) -> Result<usize, GenerateError> {
    let mut reporter = VisualReporter::new(FsSpanResolver::new(src_path));

    // Rendering to a string ensures buffering so that we don't interleave
    //   output between processes.
    let mut ebuf = String::new();

    for e in errs {
        writeln!(ebuf, "{}", reporter.render(e))?;
    }

    eprint!("{ebuf}");

    Ok(reporter.error_count())
}

/// Entrypoint for the generator
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = get_opts();
    let usage = opts
        .usage(&format!("Usage: {} [OPTIONS] BASECLASS GRAMMAR", program));

    match parse_options(opts, args) {
        Ok(Command::Generate {
            base,
            grammar,
            output,
            permissive,
        }) => {
            match generate(&base, &grammar, output.as_deref(), permissive) {
                Ok(()) => std::process::exit(exitcode::OK),

                Err(GenerateError::Invalid(path, errs)) => {
                    let count =
                        report_invalid(&path, &errs).unwrap_or(errs.len());

                    eprintln!(
                        "fatal: failed to generate from {} due to {} \
                           previous error(s)",
                        path.display(),
                        count,
                    );

                    std::process::exit(exitcode::DATAERR);
                }

                Err(e) => {
                    eprintln!(
                        "error: {e}\nfatal: failed to generate from {}",
                        grammar
                    );

                    std::process::exit(1);
                }
            }
        }
        Ok(Command::Usage) => {
            println!("{}", usage);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", usage);
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Get 'Options'
///
/// ```
/// use getopts::Options;
///
/// let opts = get_opts();
/// ```
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optopt("o", "output", "write to file instead of stdout", "FILE");
    opts.optflag("", "permissive", "do not validate the grammar");
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(
    opts: Options,
    args: Vec<String>,
) -> Result<Command, UsageError> {
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    let (base, grammar) = match &matches.free[..] {
        [base, grammar] => (base, grammar),
        [_, _, extra, ..] => {
            return Err(Fail::UnrecognizedOption(extra.clone()).into())
        }
        given => {
            let missing = &["BASECLASS", "GRAMMAR"][given.len()..];

            return Err(Fail::OptionMissing(
                AndConjList::<TtQuote>::wrap(missing).to_string(),
            )
            .into());
        }
    };

    let base = BaseName::new(base.as_str())
        .ok_or_else(|| UsageError::InvalidBase(base.clone()))?;

    Ok(Command::Generate {
        base,
        grammar: grammar.clone(),
        output: matches.opt_str("o"),
        permissive: matches.opt_present("permissive"),
    })
}

/// Command line that cannot be run.
#[derive(Debug, PartialEq)]
enum UsageError {
    Opts(Fail),

    /// The base class name is not an identifier.
    InvalidBase(String),
}

impl From<Fail> for UsageError {
    fn from(e: Fail) -> Self {
        Self::Opts(e)
    }
}

impl Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opts(e) => Display::fmt(e, f),
            Self::InvalidBase(name) => write!(
                f,
                "{} must be an identifier, but found {}",
                TtQuote::wrap("BASECLASS"),
                TtQuote::wrap(name),
            ),
        }
    }
}

/// Generator (`generate_ast`) error.
///
/// This represents the aggregation of all possible errors that can occur
///   while generating.
#[derive(Debug)]
pub enum GenerateError {
    Io(io::Error),
    Read(GrammarError),
    /// The grammar at the given path failed validation.
    Invalid(PathBuf, Vec<GrammarError>),
    Fmt(fmt::Error),
}

impl From<io::Error> for GenerateError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GrammarError> for GenerateError {
    fn from(e: GrammarError) -> Self {
        Self::Read(e)
    }
}

impl From<fmt::Error> for GenerateError {
    fn from(e: fmt::Error) -> Self {
        Self::Fmt(e)
    }
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Read(e) => Display::fmt(e, f),
            Self::Invalid(path, errs) => write!(
                f,
                "{} has {} error(s)",
                path.display(),
                errs.len()
            ),
            Self::Fmt(e) => Display::fmt(e, f),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Read(e) => Some(e),
            Self::Invalid(_, errs) => {
                errs.first().map(|e| e as &(dyn Error + 'static))
            }
            Self::Fmt(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(given: &[&str]) -> Vec<String> {
        std::iter::once("program")
            .chain(given.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_options_help() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["-h"]));

        match result {
            Ok(Command::Usage) => {}
            _ => panic!("Help option did not parse"),
        }
    }

    #[test]
    fn parse_options_help_long() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["--help"]));

        match result {
            Ok(Command::Usage) => {}
            _ => panic!("Long help option did not parse"),
        }
    }

    #[test]
    fn parse_options_invalid() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["-q"]));

        match result {
            Err(UsageError::Opts(Fail::UnrecognizedOption(_))) => {}
            _ => panic!("Invalid option not caught"),
        }
    }

    #[test]
    fn parse_options_missing_both() {
        let opts = get_opts();
        let result = parse_options(opts, args(&[]));

        match result {
            Err(UsageError::Opts(Fail::OptionMissing(message))) => {
                assert_eq!("`BASECLASS` and `GRAMMAR`", message);
            }
            _ => panic!("Missing arguments not caught"),
        }
    }

    #[test]
    fn parse_options_missing_grammar() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["Expr"]));

        match result {
            Err(UsageError::Opts(Fail::OptionMissing(message))) => {
                assert_eq!("`GRAMMAR`", message);
            }
            _ => panic!("Missing grammar not caught"),
        }
    }

    #[test]
    fn parse_options_too_many() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["Expr", "a", "b"]));

        match result {
            Err(UsageError::Opts(Fail::UnrecognizedOption(extra))) => {
                assert_eq!("b", extra);
            }
            _ => panic!("Extra argument not caught"),
        }
    }

    #[test]
    fn parse_options_empty_base() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["  ", "expr.grammar"]));

        match result {
            Err(UsageError::InvalidBase(name)) => {
                assert_eq!("  ", name);
            }
            _ => panic!("Empty base class not caught"),
        }
    }

    #[test]
    fn parse_options_base_not_identifier() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["My Expr", "expr.grammar"]));

        assert_eq!(
            Err(UsageError::InvalidBase("My Expr".into())),
            result,
        );
        assert_eq!(
            "`BASECLASS` must be an identifier, but found `My Expr`",
            result.unwrap_err().to_string(),
        );
    }

    #[test]
    fn invalid_grammar_reports_path_it_was_opened_from() {
        let path =
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/invalid.grammar");
        let base = BaseName::new("Expr").unwrap();

        match generate(&base, path, None, false) {
            Err(GenerateError::Invalid(given, errs)) => {
                assert_eq!(Path::new(path), given);
                assert_eq!(3, errs.len());
            }
            other => panic!("expected validation failure: {other:?}"),
        }
    }

    #[test]
    fn missing_grammar_is_io_error() {
        let base = BaseName::new("Expr").unwrap();

        assert!(matches!(
            generate(&base, "does/not/exist.grammar", None, false),
            Err(GenerateError::Io(_))
        ));
    }

    #[test]
    fn parse_options_valid() {
        let opts = get_opts();
        let result = parse_options(opts, args(&["Expr", "expr.grammar"]));

        assert_eq!(
            Ok(Command::Generate {
                base: BaseName::new("Expr").unwrap(),
                grammar: "expr.grammar".into(),
                output: None,
                permissive: false,
            }),
            result,
        );
    }

    #[test]
    fn parse_options_output_and_permissive() {
        let opts = get_opts();
        let result = parse_options(
            opts,
            args(&["--permissive", "-o", "Stmt.kt", "Stmt", "stmt.grammar"]),
        );

        assert_eq!(
            Ok(Command::Generate {
                base: BaseName::new("Stmt").unwrap(),
                grammar: "stmt.grammar".into(),
                output: Some("Stmt.kt".into()),
                permissive: true,
            }),
            result,
        );
    }

    #[test]
    fn parse_options_output_long() {
        let opts = get_opts();
        let result = parse_options(
            opts,
            args(&["Expr", "expr.grammar", "--output", "Expr.kt"]),
        );

        match result {
            Ok(Command::Generate { output, .. }) => {
                assert_eq!(Some("Expr.kt".into()), output);
            }
            _ => panic!("Long output option did not parse"),
        }
    }
}
