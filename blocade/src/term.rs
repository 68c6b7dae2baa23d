use std::fmt;

use crate::prelude::*;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Term {
    Abstraction(Box<Self>),
    Application(Box<Self>, Box<Self>),
    Variable(Index),
    /// Back-reference into the owning [`Table`]. Never owns its target.
    Reference(EntryId),
}

impl Term {
    /// Pre-order walk yielding every node together with the number of
    /// abstractions of `self` enclosing it.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }

    pub fn references(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.walk().filter_map(|(term, _)| match term {
            Term::Reference(entry) => Some(*entry),
            _ => None,
        })
    }

    fn detach_children(&mut self, stack: &mut Vec<Term>) {
        const HOLE: Term = Term::Variable(0);
        match self {
            Term::Abstraction(body) => stack.push(std::mem::replace(body.as_mut(), HOLE)),
            Term::Application(lhs, rhs) => {
                stack.push(std::mem::replace(lhs.as_mut(), HOLE));
                stack.push(std::mem::replace(rhs.as_mut(), HOLE));
            }
            Term::Variable(_) | Term::Reference(_) => {}
        }
    }
}

// Deeply nested input would overflow the stack with the recursive drop glue.
impl Drop for Term {
    fn drop(&mut self) {
        if matches!(self, Term::Variable(_) | Term::Reference(_)) {
            return;
        }
        let mut stack = vec![];
        self.detach_children(&mut stack);
        while let Some(mut term) = stack.pop() {
            term.detach_children(&mut stack);
        }
    }
}

pub struct Walk<'a> {
    stack: Vec<(&'a Term, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a Term, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (term, depth) = self.stack.pop()?;
        match term {
            Term::Abstraction(body) => self.stack.push((body, depth + 1)),
            Term::Application(lhs, rhs) => {
                self.stack.push((rhs, depth));
                self.stack.push((lhs, depth));
            }
            Term::Variable(_) | Term::Reference(_) => {}
        }
        Some((term, depth))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Term(&'a Term),
            Text(&'static str),
        }
        let mut stack = vec![Piece::Term(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Term(Term::Abstraction(body)) => {
                    f.write_str("(lambda _. ")?;
                    stack.push(Piece::Text(")"));
                    stack.push(Piece::Term(body));
                }
                Piece::Term(Term::Application(lhs, rhs)) => {
                    f.write_str("(")?;
                    stack.push(Piece::Text(")"));
                    stack.push(Piece::Term(rhs));
                    stack.push(Piece::Text(" "));
                    stack.push(Piece::Term(lhs));
                }
                Piece::Term(Term::Variable(index)) => f.write_fmt(format_args!("v_{index}"))?,
                Piece::Term(Term::Reference(entry)) => f.write_fmt(format_args!("@{entry}"))?,
            }
        }
        Ok(())
    }
}

/// The entry table of a BLoC program. The last entry is the root.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct Table {
    entries: Vec<Term>,
}

impl Table {
    /// Builds a table, rejecting references that point outside of it.
    pub fn new(entries: Vec<Term>) -> Result<Self> {
        let length = entries.len();
        for term in &entries {
            if let Some(entry) = term.references().find(|&entry| entry >= length) {
                return Err(Error::out_of_range(entry, length));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Term] {
        &self.entries
    }

    pub fn get(&self, entry: EntryId) -> Result<&Term> {
        self.entries
            .get(entry)
            .ok_or_else(|| Error::out_of_range(entry, self.len()))
    }

    pub fn root_id(&self) -> Result<EntryId> {
        self.len().checked_sub(1).ok_or(Error::EmptyTable)
    }

    pub fn root(&self) -> Result<&Term> {
        self.get(self.root_id()?)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.entries.iter().enumerate() {
            f.write_fmt(format_args!("{i}: {term}\n"))?;
        }
        Ok(())
    }
}
