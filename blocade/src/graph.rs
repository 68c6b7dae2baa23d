use crate::{prelude::*, term::Table};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Direct-reference edges of every entry, ascending and without duplicates.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Dependencies {
    edges: Vec<Vec<EntryId>>,
}

impl Dependencies {
    pub fn new(table: &Table) -> Self {
        let edges = table
            .entries()
            .iter()
            .map(|term| {
                let mut deps = term.references().collect::<Vec<_>>();
                deps.sort_unstable();
                deps.dedup();
                deps
            })
            .collect();
        Self { edges }
    }

    pub fn of(&self, entry: EntryId) -> &[EntryId] {
        self.edges.get(entry).map(Vec::as_slice).unwrap_or_default()
    }

    /// Depth-first post-order over everything reachable from `roots`, visited in the
    /// given order. Meeting an entry that is still in progress means the table
    /// describes an infinite term.
    pub fn post_order(&self, roots: impl IntoIterator<Item = EntryId>) -> Result<Vec<EntryId>> {
        let mut marks = vec![Mark::Unvisited; self.edges.len()];
        let mut order = vec![];
        let mut stack: Vec<(EntryId, usize)> = vec![];
        for root in roots {
            match marks.get(root) {
                Some(Mark::Unvisited) => {}
                Some(_) => continue,
                None => return Err(Error::out_of_range(root, self.edges.len())),
            }
            marks[root] = Mark::InProgress;
            stack.push((root, 0));
            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                frame.1 += 1;
                match self.of(node).get(next) {
                    Some(&dep) => match marks[dep] {
                        Mark::Done => {}
                        Mark::InProgress => return Err(Error::CyclicReference { entry: dep }),
                        Mark::Unvisited => {
                            marks[dep] = Mark::InProgress;
                            stack.push((dep, 0));
                        }
                    },
                    None => {
                        marks[node] = Mark::Done;
                        order.push(node);
                        stack.pop();
                    }
                }
            }
        }
        Ok(order)
    }
}
