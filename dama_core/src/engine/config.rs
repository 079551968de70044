use serde::{Deserialize, Serialize};

pub const VAL_MAN: i32 = 100;
pub const VAL_KING: i32 = 500;
pub const BONUS_ADVANCE: i32 = 10;
pub const BONUS_CENTER: i32 = 5;
pub const CENTER_REACH: i32 = 8;
pub const BONUS_EDGE: i32 = 15;
pub const WIN_SCORE: i32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_man: i32,
    pub val_king: i32,
    pub bonus_advance: i32, // Per row a man has advanced
    pub bonus_center: i32,  // Per step of (reach - distance to centre), kings only
    pub center_reach: i32,
    pub bonus_edge: i32,

    // Search Parameters
    pub depth: u8,
    pub late_game_depth: u8,
    pub late_game_pieces: usize, // Late game once fewer pieces than this remain
    pub win_score: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_man: VAL_MAN,
            val_king: VAL_KING,
            bonus_advance: BONUS_ADVANCE,
            bonus_center: BONUS_CENTER,
            center_reach: CENTER_REACH,
            bonus_edge: BONUS_EDGE,

            depth: 4,
            late_game_depth: 6,
            late_game_pieces: 10,
            win_score: WIN_SCORE,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    val_man: Option<f32>,
    val_king: Option<f32>,
    bonus_advance: Option<f32>,
    bonus_center: Option<f32>,
    bonus_edge: Option<f32>,

    center_reach: Option<i32>,
    depth: Option<u8>,
    late_game_depth: Option<u8>,
    late_game_pieces: Option<usize>,
    win_score: Option<i32>,
}

impl EngineConfig {
    /// Weights in the JSON scale the defaults; search fields are taken as-is.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON or mistyped fields.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_man: apply_scale(default.val_man, json_config.val_man),
            val_king: apply_scale(default.val_king, json_config.val_king),
            bonus_advance: apply_scale(default.bonus_advance, json_config.bonus_advance),
            bonus_center: apply_scale(default.bonus_center, json_config.bonus_center),
            center_reach: json_config.center_reach.unwrap_or(default.center_reach),
            bonus_edge: apply_scale(default.bonus_edge, json_config.bonus_edge),

            depth: json_config.depth.unwrap_or(default.depth),
            late_game_depth: json_config
                .late_game_depth
                .unwrap_or(default.late_game_depth),
            late_game_pieces: json_config
                .late_game_pieces
                .unwrap_or(default.late_game_pieces),
            win_score: json_config.win_score.unwrap_or(default.win_score),
        })
    }

    /// Search depth for a position holding `total_pieces` pieces.
    #[must_use]
    pub const fn depth_for(&self, total_pieces: usize) -> u8 {
        if total_pieces < self.late_game_pieces {
            self.late_game_depth
        } else {
            self.depth
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.val_man, VAL_MAN);
        assert_eq!(config.depth, 4);
    }

    #[test]
    fn test_load_config_scaled() {
        let json = r#"{
            "val_king": 1.5,
            "bonus_edge": 2.0,
            "depth": 2
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.val_king, 750);
        assert_eq!(config.bonus_edge, 30);
        assert_eq!(config.depth, 2);
        // Others should be default
        assert_eq!(config.val_man, VAL_MAN);
        assert_eq!(config.late_game_depth, 6);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(EngineConfig::load_from_json("{ invalid json }").is_err());
    }

    #[test]
    fn test_deserialize_absolute_config() {
        let json = r#"{
            "val_man": 120,
            "late_game_pieces": 6
        }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.val_man, 120);
        assert_eq!(config.late_game_pieces, 6);
        assert_eq!(config.val_king, VAL_KING);
    }

    #[test]
    fn test_depth_widens_in_late_game() {
        let config = EngineConfig::default();
        assert_eq!(config.depth_for(24), 4);
        assert_eq!(config.depth_for(10), 4);
        assert_eq!(config.depth_for(9), 6);
    }
}
