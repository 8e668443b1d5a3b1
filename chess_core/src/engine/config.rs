use crate::logic::board::PieceType;
use crate::logic::eval_constants::{
    MATE_SCORE, STALEMATE_SCORE, VAL_BISHOP, VAL_KING, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEPTH: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,
    pub mate_score: i32,
    pub stalemate_score: i32,

    // Search Parameters
    pub depth: u8,
    pub alpha_beta: bool, // false searches the full tree
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,
            mate_score: MATE_SCORE,
            stalemate_score: STALEMATE_SCORE,

            depth: DEFAULT_DEPTH,
            alpha_beta: true,
            seed: None,
        }
    }
}

/// Piece values in the file are multipliers on the defaults; everything else is absolute.
#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f32>,
    val_knight: Option<f32>,
    val_bishop: Option<f32>,
    val_rook: Option<f32>,
    val_queen: Option<f32>,
    val_king: Option<f32>,
    mate_score: Option<i32>,
    stalemate_score: Option<i32>,

    depth: Option<u8>,
    alpha_beta: Option<bool>,
    seed: Option<u64>,
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_bishop: apply_scale(default.val_bishop, json_config.val_bishop),
            val_rook: apply_scale(default.val_rook, json_config.val_rook),
            val_queen: apply_scale(default.val_queen, json_config.val_queen),
            val_king: apply_scale(default.val_king, json_config.val_king),
            mate_score: json_config.mate_score.unwrap_or(default.mate_score),
            stalemate_score: json_config
                .stalemate_score
                .unwrap_or(default.stalemate_score),

            depth: json_config.depth.unwrap_or(default.depth),
            alpha_beta: json_config.alpha_beta.unwrap_or(default.alpha_beta),
            seed: json_config.seed.or(default.seed),
        })
    }

    #[must_use]
    pub const fn piece_value(&self, piece_type: PieceType) -> i32 {
        match piece_type {
            PieceType::Pawn => self.val_pawn,
            PieceType::Knight => self.val_knight,
            PieceType::Bishop => self.val_bishop,
            PieceType::Rook => self.val_rook,
            PieceType::Queen => self.val_queen,
            PieceType::King => self.val_king,
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
        let json = "{}";
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.depth, 3);
        assert_eq!(config.mate_score, 1000);
        assert!(config.alpha_beta);
    }

    #[test]
    fn test_load_config_scaled() {
        let json = r#"{
            "val_queen": 1.5,
            "val_rook": 2.0
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.val_queen, 15);
        assert_eq!(config.val_rook, 10);
        // Others should be default
        assert_eq!(config.val_knight, VAL_KNIGHT);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let json = "{ invalid json }";
        let result = EngineConfig::load_from_json(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_search_fields() {
        let json = r#"{
            "depth": 2,
            "alpha_beta": false,
            "seed": 7,
            "mate_score": 5000
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.depth, 2);
        assert!(!config.alpha_beta);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mate_score, 5000);
        assert_eq!(config.val_pawn, VAL_PAWN);
    }

    #[test]
    fn test_load_config_edge_cases() {
        let json = r#"{
            "val_pawn": 0.0,
            "val_rook": -1.0
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();

        assert_eq!(config.val_pawn, 0);
        assert_eq!(config.val_rook, -VAL_ROOK);
    }

    #[test]
    fn test_deserialize_absolute_config() {
        let json = r#"{
            "val_pawn": 2,
            "depth": 4
        }"#;

        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.val_pawn, 2);
        assert_eq!(config.depth, 4);
        // Check default values
        assert_eq!(config.val_rook, VAL_ROOK);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_piece_value_lookup() {
        let config = EngineConfig::default();
        let values: Vec<i32> = PieceType::ALL
            .iter()
            .map(|&p| config.piece_value(p))
            .collect();
        assert_eq!(values, vec![1, 3, 3, 5, 10, 0]);
    }
}
