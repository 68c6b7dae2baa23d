//! Rebuilds sharing for BLC output.
//!
//! Every closed entry (one that neither has variables escaping its own
//! abstractions nor refers to an open entry) gets its own let-binding, encoded
//! as `(lambda x. rest) content`. Bindings are nested so that an entry sits
//! inside the scope of everything it depends on:
//!
//! ```text
//! (lambda x_{n-1}. ... (lambda x_1. (lambda x_0. root) c_0) c_1 ... ) c_{n-1}
//! ```
//!
//! References to bound entries become variables pointing at their binder;
//! references to open entries are inlined.

use std::io::Write;

use tracing::{debug, trace};

use crate::{graph::Dependencies, prelude::*, term::*, writer::BitWriter};

#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct Options {
    /// Only bind closed entries that the root can reach.
    pub prune_unreachable: bool,
}

/// Which entries get bound, and where.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Schedule {
    root: EntryId,
    closed: Vec<bool>,
    order: Vec<EntryId>,
    depth: Vec<Option<usize>>,
}

/// An entry is closed when every variable is bound inside it and every entry it
/// refers to is closed. Targets are classified before their referrers.
fn classify(table: &Table, deps: &Dependencies) -> Result<Vec<bool>> {
    let mut closed = vec![false; table.len()];
    for entry in deps.post_order(0..table.len())? {
        let is_closed = table.get(entry)?.walk().all(|(node, depth)| match node {
            Term::Variable(index) => *index < depth,
            Term::Reference(target) => closed[*target],
            Term::Abstraction(_) | Term::Application(_, _) => true,
        });
        closed[entry] = is_closed;
    }
    Ok(closed)
}

impl Schedule {
    pub fn new(table: &Table, options: Options) -> Result<Self> {
        let root = table.root_id()?;
        let deps = Dependencies::new(table);
        let closed = classify(table, &deps)?;

        let candidates = if options.prune_unreachable {
            let mut reachable = deps.post_order([root])?;
            reachable.sort_unstable();
            reachable
        } else {
            (0..table.len()).collect()
        };
        let order = deps.post_order(
            candidates
                .into_iter()
                .filter(|&entry| entry != root && closed[entry]),
        )?;

        // The k-th entry to complete (1-indexed) binds at depth `end - k`.
        let end = order.len();
        let mut depth = vec![None; table.len()];
        for (k, &entry) in order.iter().enumerate() {
            depth[entry] = Some(end - k - 1);
        }
        debug!(
            closed = closed.iter().filter(|&&c| c).count(),
            scheduled = end,
            "scheduled shared entries"
        );
        trace!(?order, "completion order");
        Ok(Self {
            root,
            closed,
            order,
            depth,
        })
    }

    pub fn is_closed(&self, entry: EntryId) -> bool {
        self.closed.get(entry).copied().unwrap_or(false)
    }

    /// Bound entries in the order the topological visit completed them.
    pub fn order(&self) -> &[EntryId] {
        &self.order
    }

    /// Binding depth of a bound entry, 0 being the binder closest to the root.
    pub fn depth(&self, entry: EntryId) -> Option<usize> {
        self.depth.get(entry).copied().flatten()
    }

    /// Number of introduced bindings.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bound entries from the innermost binding outwards.
    pub fn bindings(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.order.iter().rev().copied()
    }

    pub fn render<W: Write>(&self, table: &Table, writer: &mut BitWriter<W>) -> Result<()> {
        for _ in 0..self.len() {
            writer.application()?;
            writer.abstraction()?;
        }
        self.render_content(table, self.root, 0, writer)?;
        for (depth, entry) in self.bindings().enumerate() {
            self.render_content(table, entry, depth + 1, writer)?;
        }
        Ok(())
    }

    /// `base` counts the binders between the rendered content and the root, so a
    /// binder at depth `d` is `d - base` binders away from the content itself.
    fn render_content<W: Write>(
        &self,
        table: &Table,
        entry: EntryId,
        base: usize,
        writer: &mut BitWriter<W>,
    ) -> Result<()> {
        let end = self.len();
        let mut stack = vec![(table.get(entry)?, 0)];
        while let Some((term, crossed)) = stack.pop() {
            match term {
                Term::Abstraction(body) => {
                    writer.abstraction()?;
                    stack.push((body, crossed + 1));
                }
                Term::Application(lhs, rhs) => {
                    writer.application()?;
                    stack.push((rhs, crossed));
                    stack.push((lhs, crossed));
                }
                // Free in the whole content: skip the bindings introduced around it.
                Term::Variable(index) if *index >= crossed => {
                    writer.variable(index + end - base)?
                }
                Term::Variable(index) => writer.variable(*index)?,
                Term::Reference(target) => match self.depth(*target) {
                    Some(depth) if depth >= base => writer.variable(crossed + depth - base)?,
                    _ => stack.push((table.get(*target)?, crossed)),
                },
            }
        }
        Ok(())
    }
}

/// Emits the root of `table` as a single BLC term with shared closed entries
/// bound once.
pub fn reconstruct<W: Write>(
    table: &Table,
    writer: &mut BitWriter<W>,
    options: Options,
) -> Result<Schedule> {
    let schedule = Schedule::new(table, options)?;
    schedule.render(table, writer)?;
    Ok(schedule)
}
