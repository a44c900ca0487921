use crate::core::gate::{self, ValidationError};
use crate::core::partition::{partition, RandomSource};
use crate::domain::model::{GroupingRequest, GroupingResult};

/// Validation followed by partitioning, with a fresh generator per call.
#[derive(Debug, Clone, Default)]
pub struct ShuffleService {
    random: RandomSource,
}

impl ShuffleService {
    pub fn new(random: RandomSource) -> Self {
        Self { random }
    }

    pub fn random_source(&self) -> RandomSource {
        self.random
    }

    pub fn shuffle(&self, request: &GroupingRequest) -> Result<GroupingResult, ValidationError> {
        let normalized = gate::validate(request)?;
        let mut rng = self.random.rng();
        let groups = partition(&normalized.participants, normalized.mode, &mut rng);

        tracing::debug!(
            participants = normalized.participants.len(),
            mode = ?normalized.mode,
            groups = groups.len(),
            "partitioned participants"
        );

        Ok(GroupingResult { groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_four_into_pairs() {
        let service = ShuffleService::default();
        let request = GroupingRequest::by_size(names(&["Alice", "Bob", "Charlie", "Dave"]), 2);

        let result = service.shuffle(&request).unwrap();

        assert_eq!(result.groups.len(), 2);
        assert!(result.groups.iter().all(|group| group.len() == 2));
        let members: HashSet<&String> = result.groups.iter().flatten().collect();
        assert_eq!(members.len(), 4);
        assert_eq!(result.total_members(), 4);
    }

    #[test]
    fn test_rejects_before_partitioning() {
        let service = ShuffleService::default();
        let request = GroupingRequest::by_size(names(&["Alice", "Bob"]), 2);
        assert_eq!(
            service.shuffle(&request).unwrap_err(),
            ValidationError::MinimumParticipants { min: 4 }
        );
    }

    #[test]
    fn test_output_uses_normalized_names() {
        let service = ShuffleService::new(RandomSource::Seeded(1));
        let request = GroupingRequest::by_count(
            names(&[" Alice ", "", "Bob", "  ", "Charlie", "Dave\t"]),
            2,
        );

        let result = service.shuffle(&request).unwrap();

        let mut members: Vec<String> = result.groups.into_iter().flatten().collect();
        members.sort();
        assert_eq!(members, names(&["Alice", "Bob", "Charlie", "Dave"]));
    }

    #[test]
    fn test_seeded_service_is_repeatable() {
        let service = ShuffleService::new(RandomSource::Seeded(1234));
        let request = GroupingRequest::by_size(
            names(&["Alice", "Bob", "Charlie", "Dave", "Eve", "Frank", "Grace"]),
            3,
        );

        let first = service.shuffle(&request).unwrap();
        let second = service.shuffle(&request).unwrap();
        assert_eq!(first, second);
    }
}
