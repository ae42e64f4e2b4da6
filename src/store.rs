use crate::error::{MaptyError, Result};
use crate::types::Workout;
use std::collections::HashSet;

/// Ordered in-memory collection of the session's workouts.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, workout: Workout) -> Result<()> {
        if self.position(workout.id()).is_some() {
            return Err(MaptyError::DuplicateId(workout.id().to_string()));
        }
        self.workouts.push(workout);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Workout> {
        self.position(id)
            .map(|i| &self.workouts[i])
            .ok_or_else(|| MaptyError::NotFound(id.to_string()))
    }

    pub fn record_interaction(&mut self, id: &str) -> Result<u32> {
        let i = self
            .position(id)
            .ok_or_else(|| MaptyError::NotFound(id.to_string()))?;
        Ok(self.workouts[i].record_interaction())
    }

    /// Insertion-ordered view. The iterator can be cloned to restart it and
    /// holds a shared borrow, so the store cannot change underneath it.
    pub fn all(&self) -> impl Iterator<Item = &Workout> + Clone + '_ {
        self.workouts.iter()
    }

    /// Swaps in a whole new collection. Ids are checked first; on error the
    /// current contents are left untouched.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<()> {
        let mut seen = HashSet::with_capacity(workouts.len());
        for w in &workouts {
            if !seen.insert(w.id()) {
                return Err(MaptyError::DuplicateId(w.id().to_string()));
            }
        }
        self.workouts = workouts;
        Ok(())
    }

    /// Takes a record back out, keeping the order of the others.
    pub fn remove(&mut self, id: &str) -> Result<Workout> {
        let i = self
            .position(id)
            .ok_or_else(|| MaptyError::NotFound(id.to_string()))?;
        Ok(self.workouts.remove(i))
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.workouts.iter().position(|w| w.id() == id)
    }
}
