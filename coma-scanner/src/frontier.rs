use std::collections::{HashSet, VecDeque};
use url::Url;

/// URLs discovered but not yet processed, each tagged with its hop
/// distance from the seeds.
///
/// Behaves as a set keyed by the URL string: inserting a URL that is
/// already waiting is a no-op and keeps the first depth. Pops come out
/// in insertion order.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<(Url, usize)>,
    pending: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the URL was already waiting.
    pub fn insert(&mut self, url: Url, depth: usize) -> bool {
        if !self.pending.insert(url.as_str().to_string()) {
            return false;
        }
        self.queue.push_back((url, depth));
        true
    }

    pub fn pop(&mut self) -> Option<(Url, usize)> {
        let (url, depth) = self.queue.pop_front()?;
        self.pending.remove(url.as_str());
        Some((url, depth))
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.pending.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Extend<(Url, usize)> for Frontier {
    fn extend<I: IntoIterator<Item = (Url, usize)>>(&mut self, iter: I) {
        for (url, depth) in iter {
            self.insert(url, depth);
        }
    }
}
