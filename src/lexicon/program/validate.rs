//! Structural validation of the macro table.
//!
//! Two passes, both over plain indices:
//! 1. every reference must land inside the table;
//! 2. the subroutine graph must be acyclic.
//!
//! The second pass is an iterative depth-first search, so a long chain of
//! nested subroutines cannot exhaust the call stack. Its post-order is a
//! topological order (children before parents) that expansion reuses.

use std::iter;

use log::trace;

use crate::lexicon::types::error::{LexiconError, Result};
use crate::lexicon::types::models::Macro;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

struct Frame<'m> {
    node: usize,
    refs: &'m [usize],
    next: usize,
}

/// Verifies that every subroutine reference and every program instruction
/// names an existing macro.
pub fn check_references(macros: &[Macro], program: &[usize]) -> Result<()> {
    let table_len = macros.len();

    for (index, entry) in macros.iter().enumerate() {
        if let Macro::Subroutine(refs) = entry
            && let Some(&target) = refs.iter().find(|&&r| r >= table_len)
        {
            return Err(LexiconError::InvalidReference {
                from: format!("macro {}", index),
                target,
                table_len,
            });
        }
    }

    if let Some((position, &target)) = program.iter().enumerate().find(|&(_, &r)| r >= table_len) {
        return Err(LexiconError::InvalidReference {
            from: format!("instruction {}", position),
            target,
            table_len,
        });
    }

    Ok(())
}

/// Returns the subroutine indices in post-order, or `CyclicReference` if a
/// subroutine can reach itself.
///
/// References must already have been checked with [`check_references`].
pub fn topological_order(macros: &[Macro]) -> Result<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; macros.len()];
    let mut order = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for (root, entry) in macros.iter().enumerate() {
        let Macro::Subroutine(refs) = entry else { continue };
        if marks[root] != Mark::Unvisited {
            continue;
        }

        marks[root] = Mark::OnStack;
        stack.push(Frame { node: root, refs, next: 0 });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            match frame.refs.get(frame.next) {
                Some(&child) => {
                    frame.next += 1;
                    let Macro::Subroutine(child_refs) = &macros[child] else { continue };
                    match marks[child] {
                        Mark::OnStack => {
                            let path: Vec<usize> = stack
                                .iter()
                                .map(|f| f.node)
                                .skip_while(|&n| n != child)
                                .chain(iter::once(child))
                                .collect();
                            return Err(LexiconError::CyclicReference { macro_index: child, path });
                        }
                        Mark::Unvisited => {
                            marks[child] = Mark::OnStack;
                            stack.push(Frame { node: child, refs: child_refs, next: 0 });
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[node] = Mark::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    trace!("Subroutine graph is acyclic ({} subroutines)", order.len());
    Ok(order)
}
