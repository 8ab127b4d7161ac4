//! Materialization of the instruction program into words.
//!
//! Every subroutine expansion is computed once, in topological order, and
//! cached in a slot indexed by macro number. An expansion is kept as the
//! text between its `Clear` markers, so a subroutine that contains word
//! boundaries composes correctly with whatever surrounds it.

use log::{debug, trace};

use crate::lexicon::types::error::{LexiconError, Result};
use crate::lexicon::types::models::{DecodeOptions, Macro};

/// Clear-separated text fragments. Never empty: `n` clears give `n + 1` fragments.
///
/// `len` counts text bytes plus one per clear, so runs of bare word
/// boundaries are bounded by the same limit as text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Expansion {
    fragments: Vec<String>,
    len: usize,
}

impl Expansion {
    fn new() -> Self {
        Self {
            fragments: vec![String::new()],
            len: 0,
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(last) = self.fragments.last_mut() {
            last.push_str(text);
        }
        self.len += text.len();
    }

    fn push_clear(&mut self) {
        self.fragments.push(String::new());
        self.len += 1;
    }

    fn append(&mut self, other: &Expansion) {
        let mut rest = other.fragments.iter();
        if let Some(first) = rest.next()
            && let Some(last) = self.fragments.last_mut()
        {
            last.push_str(first);
        }
        self.fragments.extend(rest.cloned());
        self.len += other.len;
    }
}

/// Expands `program` against `macros` and returns the non-empty words in
/// emission order.
///
/// `order` must be the post-order from
/// [`topological_order`](super::validate::topological_order).
pub fn materialize(
    macros: &[Macro],
    program: &[usize],
    order: &[usize],
    options: &DecodeOptions,
) -> Result<Vec<String>> {
    let needed = reachable_subroutines(macros, program, order);
    let mut cache: Vec<Option<Expansion>> = vec![None; macros.len()];

    for &node in order {
        if !needed[node] {
            continue;
        }
        let Macro::Subroutine(refs) = &macros[node] else { continue };

        let mut expansion = Expansion::new();
        for &child in refs {
            let grown = expansion.len.saturating_add(expanded_len(macros, &cache, child));
            DecodeOptions::check(options.max_expanded_len, "expanded length", grown)?;
            expand_into(&mut expansion, macros, &cache, child, Some(node))?;
        }
        trace!(
            "Expanded macro {}: size {}, {} fragments",
            node,
            expansion.len,
            expansion.fragments.len()
        );
        cache[node] = Some(expansion);
    }

    let mut accumulator = Expansion::new();
    for &instruction in program {
        let grown = accumulator.len.saturating_add(expanded_len(macros, &cache, instruction));
        DecodeOptions::check(options.max_expanded_len, "expanded length", grown)?;
        expand_into(&mut accumulator, macros, &cache, instruction, None)?;
    }

    let words: Vec<String> = accumulator
        .fragments
        .into_iter()
        .filter(|word| !word.is_empty())
        .collect();
    debug!("Materialized {} words (expanded size {})", words.len(), accumulator.len);
    Ok(words)
}

/// Size macro `index` adds when appended, without building anything.
/// A subroutine that is not cached yet counts as zero; `expand_into`
/// reports it.
fn expanded_len(macros: &[Macro], cache: &[Option<Expansion>], index: usize) -> usize {
    match &macros[index] {
        Macro::Clear => 1,
        Macro::Subword(text) => text.len(),
        Macro::Subroutine(_) => cache[index].as_ref().map_or(0, |cached| cached.len),
    }
}

/// Appends the expansion of macro `index` to `target`.
///
/// `parent` only feeds the error message; `None` is the top-level program.
fn expand_into(
    target: &mut Expansion,
    macros: &[Macro],
    cache: &[Option<Expansion>],
    index: usize,
    parent: Option<usize>,
) -> Result<()> {
    match &macros[index] {
        Macro::Clear => target.push_clear(),
        Macro::Subword(text) => target.push_text(text),
        Macro::Subroutine(_) => {
            let cached = cache[index].as_ref().ok_or_else(|| {
                let from = match parent {
                    Some(parent) => format!("macro {}", parent),
                    None => "the program".to_string(),
                };
                LexiconError::InvalidFormat(format!(
                    "Subroutine {} referenced from {} was not expanded before use",
                    index, from
                ))
            })?;
            target.append(cached);
        }
    }
    Ok(())
}

/// Marks the subroutines the program can reach. Walking the post-order in
/// reverse visits every parent before its children.
fn reachable_subroutines(macros: &[Macro], program: &[usize], order: &[usize]) -> Vec<bool> {
    let mut needed = vec![false; macros.len()];
    for &instruction in program {
        needed[instruction] = true;
    }
    for &node in order.iter().rev() {
        if !needed[node] {
            continue;
        }
        if let Macro::Subroutine(refs) = &macros[node] {
            for &child in refs {
                needed[child] = true;
            }
        }
    }
    needed
}
