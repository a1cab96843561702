//! Robot composition.

mod part;

pub use part::{Component, Part, PartCategory, PartCode};

use common::Outcome;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidRobotState, RobotError};

/// A robot made of exactly one part per category.
///
/// The only way to obtain one is [`Robot::from_parts`], so a `Robot` value is
/// always valid. Deserialization goes through the same check. Parts are held
/// by value and are detached from catalog stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RobotParts")]
pub struct Robot {
    face: Part,
    material: Part,
    arms: Part,
    mobility: Part,
}

impl Robot {
    /// Validates `parts` and builds a robot from them.
    ///
    /// Every category is checked, so the failure carries all violations
    /// rather than the first one. When a category has exactly one part, that
    /// part is used.
    pub fn from_parts(parts: &[Part]) -> Outcome<Robot, InvalidRobotState> {
        let tally = Tally::of(parts);
        let errors = tally.violations();

        match tally.first {
            [Some(face), Some(material), Some(arms), Some(mobility)] if errors.is_empty() => {
                Outcome::Success(Robot {
                    face: face.clone(),
                    material: material.clone(),
                    arms: arms.clone(),
                    mobility: mobility.clone(),
                })
            }
            _ => Outcome::Failure(InvalidRobotState::new(errors)),
        }
    }

    pub fn face(&self) -> &Part {
        &self.face
    }

    pub fn material(&self) -> &Part {
        &self.material
    }

    pub fn arms(&self) -> &Part {
        &self.arms
    }

    pub fn mobility(&self) -> &Part {
        &self.mobility
    }

    /// All four parts in category order.
    pub fn parts(&self) -> [&Part; 4] {
        [&self.face, &self.material, &self.arms, &self.mobility]
    }
}

/// Wire shape of a robot, checked by [`Robot::from_parts`] on the way in.
#[derive(Deserialize)]
struct RobotParts {
    face: Part,
    material: Part,
    arms: Part,
    mobility: Part,
}

impl TryFrom<RobotParts> for Robot {
    type Error = InvalidRobotState;

    fn try_from(raw: RobotParts) -> Result<Self, Self::Error> {
        Robot::from_parts(&[raw.face, raw.material, raw.arms, raw.mobility]).into_result()
    }
}

/// Returns one violation per category that does not have exactly one part,
/// in [`PartCategory::ALL`] order.
pub fn validate_parts(parts: &[Part]) -> Vec<RobotError> {
    Tally::of(parts).violations()
}

/// Part count and first part seen, per category slot.
struct Tally<'a> {
    counts: [usize; 4],
    first: [Option<&'a Part>; 4],
}

impl<'a> Tally<'a> {
    fn of(parts: &'a [Part]) -> Self {
        let mut tally = Tally {
            counts: [0; 4],
            first: [None; 4],
        };
        for part in parts {
            let slot = part.category().index();
            tally.counts[slot] += 1;
            if tally.first[slot].is_none() {
                tally.first[slot] = Some(part);
            }
        }
        tally
    }

    fn violations(&self) -> Vec<RobotError> {
        PartCategory::ALL
            .into_iter()
            .zip(self.counts)
            .filter_map(|(category, count)| match count {
                0 => Some(RobotError::MissingMandatoryPart(category)),
                1 => None,
                _ => Some(RobotError::TooManyOptionsForPart(category)),
            })
            .collect()
    }
}
