//! Per-issuer score records.

use crate::domain::{Issuer, clamp_score};
use crate::error::CoreError;
use crate::models::classify;

/// Issuer records in catalog order, addressed by issuer code.
#[derive(Debug, Clone, Default)]
pub struct ScoreModel {
    issuers: Vec<Issuer>,
}

impl ScoreModel {
    /// Build the model from seed records.
    ///
    /// Scores are clamped and ratings re-derived, so a seed record with a
    /// hand-written rating that disagrees with its score is normalised here.
    /// A later record with a duplicate code replaces the earlier one.
    pub fn new(seed: impl IntoIterator<Item = Issuer>) -> Self {
        let mut issuers: Vec<Issuer> = Vec::new();
        for mut issuer in seed {
            issuer.current_score = clamp_score(issuer.current_score);
            issuer.rating = classify(issuer.current_score);
            match issuers.iter_mut().find(|i| i.code == issuer.code) {
                Some(slot) => *slot = issuer,
                None => issuers.push(issuer),
            }
        }
        Self { issuers }
    }

    pub fn get(&self, code: &str) -> Result<&Issuer, CoreError> {
        self.issuers
            .iter()
            .find(|i| i.code == code)
            .ok_or_else(|| CoreError::not_found(code))
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Result<&mut Issuer, CoreError> {
        self.issuers
            .iter_mut()
            .find(|i| i.code == code)
            .ok_or_else(|| CoreError::not_found(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.issuers.iter().any(|i| i.code == code)
    }

    pub fn issuers(&self) -> impl Iterator<Item = &Issuer> {
        self.issuers.iter()
    }

    pub(crate) fn issuers_mut(&mut self) -> impl Iterator<Item = &mut Issuer> {
        self.issuers.iter_mut()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.issuers.iter().map(|i| i.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.issuers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issuers.is_empty()
    }

    /// Set a new score for `code`.
    ///
    /// The score is clamped to the domain, `change` becomes the applied delta
    /// (post-clamp) and the rating is refreshed.
    pub fn set_score(&mut self, code: &str, new_score: f64) -> Result<&Issuer, CoreError> {
        let issuer = self.get_mut(code)?;
        apply_score(issuer, new_score);
        Ok(issuer)
    }
}

pub(crate) fn apply_score(issuer: &mut Issuer, new_score: f64) {
    let previous = issuer.current_score;
    let next = clamp_score(new_score);
    issuer.current_score = next;
    issuer.change = next - previous;
    issuer.rating = classify(next);
}
