use std::io::Write;

use crate::{graph::Dependencies, prelude::*, term::*, writer::BitWriter};

fn check_acyclic(table: &Table) -> Result<EntryId> {
    let root = table.root_id()?;
    Dependencies::new(table).post_order([root])?;
    Ok(root)
}

/// Renders the root with every reference replaced by the entry it points to.
///
/// de Bruijn indices only count abstractions met during the walk, so substituted
/// content needs no shifting.
pub fn flatten<W: Write>(table: &Table, writer: &mut BitWriter<W>) -> Result<()> {
    let root = check_acyclic(table)?;
    let mut stack = vec![table.get(root)?];
    while let Some(term) = stack.pop() {
        match term {
            Term::Abstraction(body) => {
                writer.abstraction()?;
                stack.push(body);
            }
            Term::Application(lhs, rhs) => {
                writer.application()?;
                stack.push(rhs);
                stack.push(lhs);
            }
            Term::Variable(index) => writer.variable(*index)?,
            Term::Reference(entry) => stack.push(table.get(*entry)?),
        }
    }
    Ok(())
}

/// Same walk as [`flatten`], building the sharing-free term instead of writing it.
pub fn flatten_term(table: &Table) -> Result<Term> {
    enum Frame<'a> {
        Abstraction,
        Left(&'a Term),
        Right(Term),
    }
    let root = check_acyclic(table)?;
    let mut frames = vec![];
    let mut current = table.get(root)?;
    loop {
        let mut term = loop {
            match current {
                Term::Abstraction(body) => {
                    frames.push(Frame::Abstraction);
                    current = body;
                }
                Term::Application(lhs, rhs) => {
                    frames.push(Frame::Left(rhs));
                    current = lhs;
                }
                Term::Variable(index) => break Term::Variable(*index),
                Term::Reference(entry) => current = table.get(*entry)?,
            }
        };
        loop {
            match frames.pop() {
                None => return Ok(term),
                Some(Frame::Abstraction) => term = Term::Abstraction(term.into()),
                Some(Frame::Left(rhs)) => {
                    frames.push(Frame::Right(term));
                    current = rhs;
                    break;
                }
                Some(Frame::Right(lhs)) => term = Term::Application(lhs.into(), term.into()),
            }
        }
    }
}
