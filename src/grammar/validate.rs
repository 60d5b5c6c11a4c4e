// Grammar validation
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

//! Reject grammars that would produce malformed output.
//!
//! Reading a grammar never fails on account of its contents;
//!   a malformed line simply produces malformed output.
//! Validation is a separate pass so that it may be skipped to retain that
//!   permissive behavior.

use super::{Field, Grammar, GrammarError, TypeSpec};
use crate::span::Span;
use fxhash::FxHashMap;

pub(super) fn validate(grammar: &Grammar) -> Result<(), Vec<GrammarError>> {
    let mut errs = Vec::new();
    let mut seen_types = FxHashMap::<&str, Span>::default();

    for ty in grammar.iter() {
        if ty.name().is_empty() {
            errs.push(GrammarError::EmptyTypeName(ty.span()));
        } else if let Some(first) = seen_types.get(ty.name()) {
            errs.push(GrammarError::DuplicateType {
                name: ty.name().into(),
                span: ty.name_span(),
                first: *first,
            });
        } else {
            seen_types.insert(ty.name(), ty.name_span());
        }

        validate_fields(ty, &mut errs);
    }

    match errs.is_empty() {
        true => Ok(()),
        false => Err(errs),
    }
}

fn validate_fields(ty: &TypeSpec, errs: &mut Vec<GrammarError>) {
    let mut seen = FxHashMap::<&str, Span>::default();

    for field in ty.fields() {
        if let Some(e) = check_field(ty, field) {
            errs.push(e);
            continue;
        }

        match seen.get(field.name()) {
            Some(first) => errs.push(GrammarError::DuplicateField {
                ty: ty.name().into(),
                field: field.name().into(),
                span: field.name_span(),
                first: *first,
            }),
            None => {
                seen.insert(field.name(), field.name_span());
            }
        }
    }
}

fn check_field(ty: &TypeSpec, field: &Field) -> Option<GrammarError> {
    match (field.name(), field.ty()) {
        ("", "") => Some(GrammarError::EmptyField {
            ty: ty.name().into(),
            span: field.span(),
        }),
        ("", _) => Some(GrammarError::MissingFieldName {
            ty: ty.name().into(),
            span: field.span(),
        }),
        (name, "") => Some(GrammarError::MissingFieldType {
            ty: ty.name().into(),
            field: name.into(),
            span: field.span(),
        }),
        _ => None,
    }
}
