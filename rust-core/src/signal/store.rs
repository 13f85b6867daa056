//! Ordered working set of loaded signals
//!
//! Each store owns its signals outright; two stores never share entries.

use std::fmt;

use super::{SampledSignal, Signal};
use crate::error::{Result, WorkbenchError};

/// Insertion-ordered collection of signals
#[derive(Debug, Clone)]
pub struct SignalStore<S: Signal = SampledSignal> {
    signals: Vec<S>,
}

impl<S: Signal> SignalStore<S> {
    pub fn new() -> Self {
        Self {
            signals: Vec::new(),
        }
    }

    /// Append a signal and return its position
    pub fn add(&mut self, signal: S) -> usize {
        if signal.x().is_empty() {
            log::warn!("signal '{}' has an empty analysis range", signal.name());
        }
        self.signals.push(signal);
        self.signals.len() - 1
    }

    /// Insert at `index` (equal to `len()` appends)
    pub fn insert(&mut self, index: usize, signal: S) -> Result<()> {
        if index > self.signals.len() {
            return Err(self.out_of_range(index));
        }
        self.signals.insert(index, signal);
        Ok(())
    }

    /// Remove and return the signal at `index`; the store is untouched on failure
    pub fn delete(&mut self, index: usize) -> Result<S> {
        if index >= self.signals.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.signals.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&S> {
        self.signals
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut S> {
        let len = self.signals.len();
        self.signals
            .get_mut(index)
            .ok_or(WorkbenchError::OutOfRange { index, len })
    }

    /// Drop every signal
    pub fn reset(&mut self) {
        self.signals.clear();
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.signals.iter()
    }

    /// Display names in store order
    pub fn names(&self) -> Vec<&str> {
        self.signals.iter().map(|s| s.name()).collect()
    }

    fn out_of_range(&self, index: usize) -> WorkbenchError {
        WorkbenchError::OutOfRange {
            index,
            len: self.signals.len(),
        }
    }
}

impl<S: Signal> Default for SignalStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Signal> fmt::Display for SignalStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for signal in &self.signals {
            writeln!(f, "{}", signal.name())?;
        }
        Ok(())
    }
}
