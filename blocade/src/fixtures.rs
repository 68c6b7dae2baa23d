use crate::{prelude::*, term::*};

/// `[lambda x. x, @0 @0]`
pub fn shared_identity() -> Table {
    Table::new(vec![abs!(var!(0)), app!(ref_!(0), ref_!(0))]).unwrap()
}

/// A closed entry depending on another closed entry.
pub fn chain() -> Table {
    Table::new(vec![
        abs!(var!(0)),
        abs!(app!(ref_!(0), var!(0))),
        app!(ref_!(1), ref_!(0)),
    ])
    .unwrap()
}

/// Entry 0 only makes sense once inlined under the root's abstraction.
pub fn open_inlined() -> Table {
    Table::new(vec![
        var!(0),
        abs!(var!(0)),
        abs!(app!(ref_!(0), ref_!(1))),
    ])
    .unwrap()
}

/// A closed entry the root never mentions, and a free root variable.
pub fn dead_entry() -> Table {
    Table::new(vec![abs!(var!(0)), var!(0)]).unwrap()
}

pub fn cyclic() -> Table {
    Table::new(vec![ref_!(1), abs!(ref_!(0)), app!(ref_!(0), ref_!(0))]).unwrap()
}

/// Church-style combinators with sharing at several levels.
pub fn combinators() -> Table {
    Table::new(vec![
        abs!(var!(0)),
        abs!(abs!(var!(1))),
        app!(ref_!(0), ref_!(1)),
        abs!(app!(ref_!(2), var!(0))),
        abs!(app!(var!(0), abs!(app!(ref_!(3), var!(1))))),
        app!(var!(0), ref_!(0)),
        abs!(abs!(app!(ref_!(5), ref_!(4)))),
        abs!(app!(app!(ref_!(4), ref_!(5)), app!(ref_!(6), ref_!(2)))),
    ])
    .unwrap()
}

pub fn acyclic() -> Vec<Table> {
    vec![
        shared_identity(),
        chain(),
        open_inlined(),
        dead_entry(),
        combinators(),
        Table::new(vec![abs!(app!(var!(0), var!(0)))]).unwrap(),
    ]
}

/// Replaces `target` by a closed `value`, lowering the indices above it.
fn substitute(term: &Term, target: Index, value: &Term) -> Term {
    match term {
        Term::Variable(index) if *index == target => value.clone(),
        Term::Variable(index) if *index > target => var!(index - 1),
        Term::Variable(index) => var!(*index),
        Term::Abstraction(body) => abs!(substitute(body, target + 1, value)),
        Term::Application(lhs, rhs) => {
            app!(substitute(lhs, target, value), substitute(rhs, target, value))
        }
        Term::Reference(entry) => ref_!(*entry),
    }
}

/// Undoes `count` outermost `(lambda x. body) value` bindings.
pub fn contract_bindings(mut term: Term, count: usize) -> Term {
    for _ in 0..count {
        let next = match &term {
            Term::Application(lhs, value) => match lhs.as_ref() {
                Term::Abstraction(body) => substitute(body, 0, value),
                _ => panic!("expected a binding, found {term}"),
            },
            _ => panic!("expected a binding, found {term}"),
        };
        term = next;
    }
    term
}
