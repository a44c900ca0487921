use crate::domain::model::{
    normalize_participants, GroupingMode, GroupingRequest, NormalizedRequest,
};
use thiserror::Error;

pub const MIN_PARTICIPANTS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least {min} participants required")]
    MinimumParticipants { min: usize },

    #[error("either group_size or num_groups must be specified")]
    ModeRequired,

    #[error("specify only one of group_size or num_groups")]
    ConflictingModes,

    #[error("{field} must be between 1 and {max}")]
    ModeBounds { field: &'static str, max: usize },
}

/// Normalizes a raw request and resolves its single grouping mode.
///
/// Checks run in a fixed order: participant count, mode presence, mode
/// exclusivity, then mode bounds against the normalized count.
pub fn validate(request: &GroupingRequest) -> Result<NormalizedRequest, ValidationError> {
    let participants = normalize_participants(&request.participants);
    let n = participants.len();

    if n < MIN_PARTICIPANTS {
        return Err(ValidationError::MinimumParticipants {
            min: MIN_PARTICIPANTS,
        });
    }

    let mode = match (request.group_size, request.num_groups) {
        (None, None) => return Err(ValidationError::ModeRequired),
        (Some(_), Some(_)) => return Err(ValidationError::ConflictingModes),
        (Some(size), None) => GroupingMode::BySize(bounded("group_size", size, n)?),
        (None, Some(count)) => GroupingMode::ByCount(bounded("num_groups", count, n)?),
    };

    Ok(NormalizedRequest { participants, mode })
}

fn bounded(field: &'static str, value: i64, max: usize) -> Result<usize, ValidationError> {
    usize::try_from(value)
        .ok()
        .filter(|v| (1..=max).contains(v))
        .ok_or(ValidationError::ModeBounds { field, max })
}
