//! Prediction history.
//!
//! An append-only record of the filtered states in step order. With
//! [`HistoryRetention::Bounded`] it acts as a ring buffer.

use std::collections::VecDeque;

use nalgebra::{RealField, Vector2};

use crate::config::HistoryRetention;
use crate::error::{FilterError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionHistory<N: RealField> {
    states: VecDeque<Vector2<N>>,
    retention: HistoryRetention,
    dropped: usize,
}

impl<N: RealField> PredictionHistory<N> {
    pub fn new(retention: HistoryRetention) -> Result<Self> {
        if retention == HistoryRetention::Bounded(0) {
            return Err(FilterError::InvalidRetention);
        }
        Ok(PredictionHistory {
            states: VecDeque::new(),
            retention,
            dropped: 0,
        })
    }

    /// Append a state, dropping the oldest when bounded and full.
    pub(crate) fn push(&mut self, state: Vector2<N>) {
        if let HistoryRetention::Bounded(bound) = self.retention {
            while self.states.len() >= bound {
                self.states.pop_front();
                self.dropped += 1;
            }
        }
        self.states.push_back(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn retention(&self) -> HistoryRetention {
        self.retention
    }

    /// Number of states dropped by the retention bound.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn get(&self, i: usize) -> Option<&Vector2<N>> {
        self.states.get(i)
    }

    pub fn latest(&self) -> Option<&Vector2<N>> {
        self.states.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector2<N>> {
        self.states.iter()
    }

    /// The angle of each state.
    pub fn angles(&self) -> impl Iterator<Item = N> + '_ {
        self.states.iter().map(|x| x[0])
    }

    pub fn to_vec(&self) -> Vec<Vector2<N>> {
        self.states.iter().cloned().collect()
    }

    /// Take every state, leaving the history empty.
    pub fn drain(&mut self) -> Vec<Vector2<N>> {
        self.states.drain(..).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
        self.dropped = 0;
    }
}
