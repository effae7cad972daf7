use crate::domain::LabelSet;
use crate::errors::ValidationError;

use super::ServiceResult;

/// Grows category and account label sets.
pub struct LabelService;

impl LabelService {
    /// Trims `label` and appends it when absent. Returns `true` when the set grew.
    pub fn add(labels: &mut LabelSet, label: &str) -> ServiceResult<bool> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        Ok(labels.insert(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_skips_duplicates() {
        let mut labels = LabelSet::new();
        assert!(LabelService::add(&mut labels, " Pets ").unwrap());
        assert!(!LabelService::add(&mut labels, "Pets").unwrap());
        assert!(LabelService::add(&mut labels, "pets").unwrap());
        assert_eq!(labels.as_slice(), ["Pets", "pets"]);
    }

    #[test]
    fn add_rejects_blank_labels() {
        let mut labels = LabelSet::new();
        assert_eq!(
            LabelService::add(&mut labels, "   "),
            Err(ValidationError::EmptyLabel)
        );
        assert!(labels.is_empty());
    }
}
