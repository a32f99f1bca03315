//! Generic logic for code listings.

use std::{
    fmt::{self, Display, Formatter},
    slice::Iter,
    vec::IntoIter,
};

/// An ordered, append-only sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    lines: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self { lines: vec![] }
    }

    pub fn push(&mut self, line: T) {
        self.lines.push(line);
    }

    pub fn iter_instructions(&self) -> Iter<T> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
impl<T: Display> Listing<T> {
    /// Renders every line on its own.
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}
impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Display> Display for Listing<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}
