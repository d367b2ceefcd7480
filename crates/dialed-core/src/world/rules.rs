//! The Around the World ladder.

use serde::Serialize;

/// Milestone reached by a pass: a first arrival deep on the ladder, or the win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unlock {
    DeepWater,
    FinalFrontier,
    Victory,
}

impl Unlock {
    pub fn title(&self) -> &'static str {
        match self {
            Unlock::DeepWater => "Deep Water Unlocked",
            Unlock::FinalFrontier => "The Final Frontier",
            Unlock::Victory => "World Conquered",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Unlock::DeepWater => {
                "You've conquered the standard putting area. Welcome to the challenge zone."
            }
            Unlock::FinalFrontier => "50 Feet. The edge of the world. Just one make to win it all.",
            Unlock::Victory => {
                "You completed the Around The World challenge! Legendary putting performance."
            }
        }
    }
}

/// Thresholds for one station of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationRule {
    pub distance: u32,
    /// Makes needed to advance.
    pub pass: u32,
    /// Fewer makes than this retreats one station; 0 never retreats.
    pub push: u32,
    /// Fired the first time the station is reached.
    pub unlock: Option<Unlock>,
}

impl StationRule {
    const fn new(distance: u32, pass: u32, push: u32, unlock: Option<Unlock>) -> Self {
        Self {
            distance,
            pass,
            push,
            unlock,
        }
    }

    /// "3/5 to Advance", or "to Finish" on the last station.
    pub fn label(&self) -> String {
        let verb = if self.distance == FINAL_DISTANCE {
            "Finish"
        } else {
            "Advance"
        };
        format!("{}/5 to {}", self.pass, verb)
    }
}

pub const START_DISTANCE: u32 = 10;
pub const FINAL_DISTANCE: u32 = 50;

/// Stations in ladder order.
pub const LADDER: [StationRule; 8] = [
    StationRule::new(10, 5, 4, None),
    StationRule::new(15, 4, 3, None),
    StationRule::new(20, 4, 3, None),
    StationRule::new(25, 3, 2, None),
    StationRule::new(30, 3, 2, None),
    StationRule::new(33, 3, 0, None),
    StationRule::new(40, 2, 1, Some(Unlock::DeepWater)),
    StationRule::new(50, 1, 1, Some(Unlock::FinalFrontier)),
];

pub fn position(distance: u32) -> Option<usize> {
    LADDER.iter().position(|r| r.distance == distance)
}

pub fn rule_for(distance: u32) -> Option<&'static StationRule> {
    LADDER.iter().find(|r| r.distance == distance)
}

/// Ladder membership, used to validate Standard-mode distances too.
pub fn is_ladder_distance(distance: u32) -> bool {
    position(distance).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_is_ascending() {
        assert!(LADDER.windows(2).all(|w| w[0].distance < w[1].distance));
        assert_eq!(LADDER[0].distance, START_DISTANCE);
        assert_eq!(LADDER[LADDER.len() - 1].distance, FINAL_DISTANCE);
    }

    #[test]
    fn test_labels() {
        assert_eq!(rule_for(10).unwrap().label(), "5/5 to Advance");
        assert_eq!(rule_for(50).unwrap().label(), "1/5 to Finish");
        assert!(rule_for(35).is_none());
    }
}
