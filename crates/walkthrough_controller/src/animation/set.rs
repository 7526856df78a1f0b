//! AnimationSet resolution: which clip is "idle", which is "walk"
//!
//! Order of preference for each role:
//! 1. Exact name from config (`animation.idle_clip` / `animation.walk_clip`)
//! 2. Substring heuristic, case-insensitive, first match wins
//!    (idle: "idle"; motion: "walk" or "run")
//! 3. Positional fallback (idle → 0, motion → 1, or 0 with a single clip)
//!
//! The heuristic is best-effort: a clip named "walk_run" shadows a later "run",
//! and with one clip idle and motion are the same clip.

use crate::config::AnimationConfig;

/// Indices into the rig's clip list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSet {
    pub idle: usize,
    pub motion: usize,
}

impl AnimationSet {
    /// None when there are no clips at all (animation disabled)
    pub fn resolve<S: AsRef<str>>(names: &[S], config: &AnimationConfig) -> Option<Self> {
        if names.is_empty() {
            return None;
        }

        let exact = |wanted: &Option<String>| {
            wanted
                .as_deref()
                .and_then(|wanted| names.iter().position(|name| name.as_ref() == wanted))
        };
        let containing = |needles: &[&str]| {
            names.iter().position(|name| {
                let lower = name.as_ref().to_lowercase();
                needles.iter().any(|needle| lower.contains(needle))
            })
        };

        let idle = exact(&config.idle_clip)
            .or_else(|| containing(&["idle"]))
            .unwrap_or(0);
        let motion = exact(&config.walk_clip)
            .or_else(|| containing(&["walk", "run"]))
            .unwrap_or(if names.len() > 1 { 1 } else { 0 });

        Some(Self { idle, motion })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(names: &[&str]) -> Option<AnimationSet> {
        AnimationSet::resolve(names, &AnimationConfig::default())
    }

    #[test]
    fn test_no_clips_disables_animation() {
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn test_names_are_matched_case_insensitively() {
        let set = resolve(&["Armature|Walk", "T-Pose", "Armature|IDLE"]).expect("set");
        assert_eq!(set, AnimationSet { idle: 2, motion: 0 });
    }

    #[test]
    fn test_run_counts_as_motion() {
        let set = resolve(&["idle", "run"]).expect("set");
        assert_eq!(set, AnimationSet { idle: 0, motion: 1 });
    }

    #[test]
    fn test_first_match_wins() {
        let set = resolve(&["idle_a", "walk_slow", "idle_b", "run_fast"]).expect("set");
        assert_eq!(set, AnimationSet { idle: 0, motion: 1 });
    }

    #[test]
    fn test_positional_fallback() {
        assert_eq!(resolve(&["A", "B", "C"]), Some(AnimationSet { idle: 0, motion: 1 }));
        assert_eq!(resolve(&["only"]), Some(AnimationSet { idle: 0, motion: 0 }));
    }

    #[test]
    fn test_explicit_names_override_heuristic() {
        let config = AnimationConfig {
            idle_clip: Some("Breathe".to_string()),
            walk_clip: Some("Stroll".to_string()),
            ..AnimationConfig::default()
        };
        let set = AnimationSet::resolve(&["idle", "walk", "Breathe", "Stroll"], &config)
            .expect("set");
        assert_eq!(set, AnimationSet { idle: 2, motion: 3 });
    }

    #[test]
    fn test_missing_explicit_name_falls_back_to_heuristic() {
        let config = AnimationConfig {
            walk_clip: Some("Missing".to_string()),
            ..AnimationConfig::default()
        };
        let set = AnimationSet::resolve(&["idle", "walk"], &config).expect("set");
        assert_eq!(set, AnimationSet { idle: 0, motion: 1 });
    }
}
