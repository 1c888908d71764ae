//! Search and evaluation settings for the minimax engine.

use std::time::Duration;

/// Depths count total plies from the root, the root move included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineParameters {
    pub max_depth: u8,
    /// Used instead of `max_depth` once both sides are at or below
    /// `endgame_max_material`.
    pub max_depth_endgame: u8,
    /// Wall-clock budget per move, measured from search start.
    pub max_time: Duration,
    pub piece_value_weight: i32,
    pub checkmate_weight: i32,
    pub check_weight: i32,
    /// Material per side (kings excluded) at or below which the position
    /// counts as an endgame.
    pub endgame_max_material: i32,
    /// Nodes-per-second log interval. `None` disables the reporter.
    pub report_interval: Option<Duration>,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_depth_endgame: 5,
            max_time: Duration::from_secs(50),
            piece_value_weight: 1,
            checkmate_weight: 100_000,
            check_weight: 50,
            endgame_max_material: 1300,
            report_interval: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineParameters;

    #[test]
    fn struct_update_keeps_defaults() {
        let params = EngineParameters {
            max_depth: 2,
            ..EngineParameters::default()
        };
        assert_eq!(params.max_depth, 2);
        assert_eq!(params.max_depth_endgame, 5);
        assert!(params.checkmate_weight > 100 * params.check_weight);
        assert!(params.report_interval.is_none());
    }
}
