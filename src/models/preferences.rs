use serde::{Deserialize, Serialize};

/// Accumulated affinity between a profile and a genre
///
/// Produced by an external aggregation job over view history; the ranker
/// consumes these as an opaque, already-scored input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GenrePreference {
    pub genre: String,
    pub preference_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_preference_serde() {
        let pref = GenrePreference {
            genre: "drama".to_string(),
            preference_score: 12.5,
        };

        let json = serde_json::to_string(&pref).unwrap();
        let back: GenrePreference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pref);
    }
}
