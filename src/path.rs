//! Locations inside a [`Value`] tree.
//!
//! A [`Path`] is a list of [`Step`]s leading from the root of a document to one of
//! its nodes. Paths are used to point at the string behind an
//! [`AmbiguousTerminator`][crate::error::AmbiguousTerminator], and can be followed
//! with [`Value::find`].

use core::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::value::Value;

/// A single step of a [`Path`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Step {
    /// Access the nth item of a list or the nth entry of a dictionary.
    Nth(usize),

    /// Assume the current item is a dictionary entry, access its key.
    Key,

    /// Assume the current item is a dictionary entry, access its value.
    Value,
}

/// A list of [`Step`]s from the root of a [`Value`] tree.
///
/// Dictionary entries take two steps: [`Step::Nth`] to select the entry, then
/// [`Step::Key`] or [`Step::Value`]. Up to 20 steps are stored without allocating.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Path {
    steps: SmallVec<[Step; 20]>,
}

impl Path {
    /// An empty path, pointing at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// The steps from the root, outermost first
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// True for the empty path
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Descend one level
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Go back up one level
    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// Add a step, returning the extended path.
    #[must_use]
    pub fn into_step(mut self, step: Step) -> Self {
        self.push(step);
        self
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Path {
            steps: iter.into_iter().collect(),
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for step in self.steps.iter() {
            match step {
                Step::Nth(idx) => write!(f, "[{idx}]")?,
                Step::Key => f.write_str(".key")?,
                Step::Value => f.write_str(".value")?,
            }
        }
        Ok(())
    }
}

impl<'ser> Value<'ser> {
    /// Follow `path` from this value. Returns `None` if a step does not fit the
    /// value it is applied to, or an index is out of range.
    pub fn find(&self, path: &Path) -> Option<&Value<'ser>> {
        let mut current = self;
        let mut steps = path.steps().iter();

        while let Some(step) = steps.next() {
            current = match (current, step) {
                (Value::List(items), Step::Nth(idx)) => items.get(*idx)?,
                (Value::Dict(entries), Step::Nth(idx)) => {
                    let entry = entries.get(*idx)?;
                    match steps.next()? {
                        Step::Value => &entry.value,
                        // Keys are leaves, nothing can follow them
                        Step::Key => return None,
                        Step::Nth(_) => return None,
                    }
                },
                _ => return None,
            };
        }

        Some(current)
    }

    /// Follow `path` from this value, expecting it to end at a dictionary key.
    pub fn find_key(&self, path: &Path) -> Option<&[u8]> {
        let (last, parent) = match path.steps() {
            [parent @ .., Step::Nth(idx), Step::Key] => (*idx, parent),
            _ => return None,
        };
        let parent: Path = parent.iter().copied().collect();
        match self.find(&parent)? {
            Value::Dict(entries) => entries.get(last).map(|entry| &*entry.key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Value<'static> {
        Value::from_bencode(b"li99e5:hellod3:onei11e3:twoli22eeee")
            .expect("test document must decode")
    }

    #[test]
    fn display_test() {
        let path = Path::new()
            .into_step(Step::Nth(2))
            .into_step(Step::Nth(1))
            .into_step(Step::Value);
        assert_eq!("root[2][1].value", path.to_string());
        assert_eq!("root", Path::new().to_string());
    }

    #[test]
    fn find_test() {
        let doc = doc();
        let hello: Path = [Step::Nth(1)].into_iter().collect();
        assert_eq!(Some(&b"hello"[..]), doc.find(&hello).and_then(Value::as_bytes));

        let two: Path = [Step::Nth(2), Step::Nth(1), Step::Value, Step::Nth(0)]
            .into_iter()
            .collect();
        assert_eq!(Some("22"), doc.find(&two).and_then(Value::as_integer));

        assert!(doc.find(&Path::new()).is_some());
    }

    #[test]
    fn find_rejects_mismatched_steps() {
        let doc = doc();
        let bad: Path = [Step::Nth(0), Step::Nth(0)].into_iter().collect();
        assert_eq!(None, doc.find(&bad));
        let out_of_range: Path = [Step::Nth(7)].into_iter().collect();
        assert_eq!(None, doc.find(&out_of_range));
        let dangling: Path = [Step::Nth(2), Step::Nth(0)].into_iter().collect();
        assert_eq!(None, doc.find(&dangling));
    }

    #[test]
    fn find_key_test() {
        let doc = doc();
        let key: Path = [Step::Nth(2), Step::Nth(1), Step::Key].into_iter().collect();
        assert_eq!(Some(&b"two"[..]), doc.find_key(&key));
        assert_eq!(None, doc.find(&key));
    }
}
