// Tests for grammar parsing and validation
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

use super::*;
use crate::diagnose::{BufSpanResolver, Reporter, VisualReporter};

fn field_pairs(ty: &TypeSpec) -> Vec<(&str, &str)> {
    ty.fields().iter().map(|f| (f.name(), f.ty())).collect()
}

fn read(src: &str) -> Grammar {
    Grammar::read(src.as_bytes()).unwrap()
}

#[test]
fn parses_name_and_ordered_fields() {
    let src = "Binary : left: Expr, operator: Token, right: Expr";
    let ty = TypeSpec::parse(1, src);

    assert_eq!("Binary", ty.name());
    assert_eq!(
        vec![("left", "Expr"), ("operator", "Token"), ("right", "Expr")],
        field_pairs(&ty),
    );
}

#[test]
fn records_spans() {
    let src = "Binary : left: Expr, operator: Token, right: Expr";
    let ty = TypeSpec::parse(5, src);

    assert_eq!(Span::new(5, 0, 6), ty.name_span());
    assert_eq!(Span::line_of(5, src), ty.span());

    let spans: Vec<_> = ty.fields().iter().map(Field::span).collect();
    assert_eq!(
        vec![Span::new(5, 9, 10), Span::new(5, 21, 15), Span::new(5, 38, 11)],
        spans,
    );

    assert_eq!(Span::new(5, 21, 8), ty.fields()[1].name_span());
}

#[test]
fn whitespace_around_delimiters_is_insignificant() {
    let ty = TypeSpec::parse(1, "  Unary:operator :Token ,right:  Expr  ");

    assert_eq!("Unary", ty.name());
    assert_eq!(
        vec![("operator", "Token"), ("right", "Expr")],
        field_pairs(&ty),
    );
}

#[test]
fn line_without_colon_has_no_fields() {
    let ty = TypeSpec::parse(1, "  Nil  ");

    assert_eq!("Nil", ty.name());
    assert!(ty.fields().is_empty());
}

#[test]
fn empty_field_list_has_no_fields() {
    let ty = TypeSpec::parse(1, "Nil :   ");

    assert_eq!("Nil", ty.name());
    assert!(ty.fields().is_empty());
}

#[test]
fn field_type_retains_further_colons() {
    let ty = TypeSpec::parse(1, "Ref : target: pkg::Expr");

    assert_eq!(vec![("target", "pkg::Expr")], field_pairs(&ty));
}

#[test]
fn commas_nested_in_brackets_do_not_split_fields() {
    let ty = TypeSpec::parse(
        1,
        "Call : callee: Expr, args: Map<String, List<Expr>>, \
         cb: (Int, Int) -> Unit, idx: Array[Int, Int]",
    );

    assert_eq!(
        vec![
            ("callee", "Expr"),
            ("args", "Map<String, List<Expr>>"),
            ("cb", "(Int, Int) -> Unit"),
            ("idx", "Array[Int, Int]"),
        ],
        field_pairs(&ty),
    );
}

#[test]
fn function_arrow_does_not_close_bracket() {
    let grammar = read("F : f: Map<(A) -> B, C>, x: Y\n");
    let ty = &grammar.types()[0];

    assert_eq!(vec![("f", "Map<(A) -> B, C>"), ("x", "Y")], field_pairs(ty));
    assert_eq!(Ok(()), grammar.validate());
}

#[test]
fn function_type_field_at_top_level() {
    let ty = TypeSpec::parse(1, "Native : call: (List<Any?>) -> Any?, arity: Int");

    assert_eq!(
        vec![("call", "(List<Any?>) -> Any?"), ("arity", "Int")],
        field_pairs(&ty),
    );
}

#[test]
fn nullable_and_qualified_types() {
    let ty = TypeSpec::parse(
        1,
        "Class : name: Token, superclass: Expr.Variable?, methods: List<Stmt.Function>",
    );

    assert_eq!(
        vec![
            ("name", "Token"),
            ("superclass", "Expr.Variable?"),
            ("methods", "List<Stmt.Function>"),
        ],
        field_pairs(&ty),
    );
}

#[test]
fn malformed_fields_are_retained() {
    let ty = TypeSpec::parse(1, "Bad : a, : B, , c:");

    assert_eq!(
        vec![("a", ""), ("", "B"), ("", ""), ("c", "")],
        field_pairs(&ty),
    );
}

#[test]
fn field_display() {
    let ty = TypeSpec::parse(1, "T : a: List<Expr>, b");

    let rendered: Vec<_> = ty.fields().iter().map(ToString::to_string).collect();
    assert_eq!(vec!["a: List<Expr>", "b"], rendered);
}

#[test]
fn grammar_retains_file_order() {
    let grammar = read(
        "# Expressions\n\
         Binary : left: Expr, operator: Token, right: Expr\n\
         # Leaves\n\
         Literal : value: Any?\n\
         \n\
         Variable : name: Token\n",
    );

    let names: Vec<_> = grammar.iter().map(TypeSpec::name).collect();
    assert_eq!(vec!["Binary", "Literal", "Variable"], names);
    assert_eq!(3, grammar.len());

    let lines: Vec<_> = grammar.iter().map(|ty| ty.span().line()).collect();
    assert_eq!(vec![2, 4, 6], lines);
}

#[test]
fn comments_only_grammar_is_empty() {
    let grammar = read("# nothing\n# to see here\n");

    assert!(grammar.is_empty());
    assert_eq!(Grammar::default(), grammar);
}

#[test]
fn valid_grammar_validates() {
    let grammar = read(
        "Binary : left: Expr, operator: Token, right: Expr\n\
         Nil\n\
         Grouping :\n",
    );

    assert_eq!(Ok(()), grammar.validate());
}

#[test]
fn rejects_empty_type_name() {
    let grammar = read(": x: X\n");

    assert_eq!(
        Err(vec![GrammarError::EmptyTypeName(Span::new(1, 0, 6))]),
        grammar.validate(),
    );
}

#[test]
fn rejects_trailing_comma() {
    let grammar = read("A : x: X,\n");

    assert_eq!(
        Err(vec![GrammarError::EmptyField {
            ty: "A".into(),
            span: Span::new(1, 9, 0),
        }]),
        grammar.validate(),
    );
}

#[test]
fn rejects_each_malformed_field() {
    let grammar = read("Bad : a, : B, , c:\n");

    let errs = grammar.validate().unwrap_err();

    assert_eq!(4, errs.len());
    assert!(matches!(
        &errs[0],
        GrammarError::MissingFieldType { field, .. } if field == "a"
    ));
    assert!(matches!(&errs[1], GrammarError::MissingFieldName { .. }));
    assert!(matches!(&errs[2], GrammarError::EmptyField { .. }));
    assert!(matches!(
        &errs[3],
        GrammarError::MissingFieldType { field, .. } if field == "c"
    ));
}

#[test]
fn rejects_duplicate_type_names() {
    let grammar = read("A : x: X\nB\nA : y: Y\n");

    assert_eq!(
        Err(vec![GrammarError::DuplicateType {
            name: "A".into(),
            span: Span::new(3, 0, 1),
            first: Span::new(1, 0, 1),
        }]),
        grammar.validate(),
    );
}

#[test]
fn rejects_duplicate_field_names() {
    let grammar = read("Binary : left: Expr, left: Token\n");

    assert_eq!(
        Err(vec![GrammarError::DuplicateField {
            ty: "Binary".into(),
            field: "left".into(),
            span: Span::new(1, 21, 4),
            first: Span::new(1, 9, 4),
        }]),
        grammar.validate(),
    );
}

#[test]
fn same_field_name_in_different_types_is_fine() {
    let grammar = read("A : name: Token\nB : name: Token\n");

    assert_eq!(Ok(()), grammar.validate());
}

#[test]
fn reports_all_errors_in_order() {
    let grammar = read("A : x: X, x: Y\nA\nB : y: Y,\n");

    let errs = grammar.validate().unwrap_err();

    assert_eq!(3, errs.len());
    assert!(matches!(&errs[0], GrammarError::DuplicateField { .. }));
    assert!(matches!(&errs[1], GrammarError::DuplicateType { .. }));
    assert!(matches!(&errs[2], GrammarError::EmptyField { .. }));
}

#[test]
fn duplicate_field_diagnostic_renders() {
    let src = "Binary : left: Expr, left: Token\n";
    let errs = read(src).validate().unwrap_err();

    let mut reporter =
        VisualReporter::new(BufSpanResolver::new("expr.grammar", src));
    let report = reporter.render(&errs[0]).to_string();

    assert!(report.starts_with(
        "error: duplicate field `left` in type `Binary`\n  --> expr.grammar:1:22\n"
    ));
    assert!(report.contains("^^^^ error: `left` declared again here"));
    assert!(report.contains("---- note: `left` first declared here"));
    assert_eq!(1, reporter.error_count());
}
