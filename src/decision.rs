use std::fmt;

use serde::{Deserialize, Serialize};

/// Release level implied by one commit or a whole module.
///
/// Variants are declared in severity order so the derived `Ord` ranks
/// `None < Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpDecision {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpDecision::None => "none",
            BumpDecision::Patch => "patch",
            BumpDecision::Minor => "minor",
            BumpDecision::Major => "major",
        }
    }

    /// Whether a release should be cut at all
    pub fn is_release(&self) -> bool {
        *self != BumpDecision::None
    }
}

impl fmt::Display for BumpDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce per-commit decisions to the most severe one.
///
/// This is a plain max-reduction, so it is associative and independent of
/// input order. Empty input yields [`BumpDecision::None`].
pub fn aggregate<I>(decisions: I) -> BumpDecision
where
    I: IntoIterator<Item = BumpDecision>,
{
    decisions
        .into_iter()
        .fold(BumpDecision::None, BumpDecision::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use BumpDecision::*;

    #[test]
    fn test_severity_ordering() {
        assert!(None < Patch);
        assert!(Patch < Minor);
        assert!(Minor < Major);
    }

    #[test]
    fn test_aggregate_empty_is_none() {
        assert_eq!(aggregate(Vec::new()), None);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        assert_eq!(aggregate([Patch, Major, None]), Major);
        assert_eq!(aggregate([Major, None, Patch]), Major);
        assert_eq!(aggregate([None, Patch, Major]), Major);
    }

    #[test]
    fn test_aggregate_is_associative() {
        let left = aggregate([aggregate([Patch, Minor]), None]);
        let right = aggregate([Patch, aggregate([Minor, None])]);
        assert_eq!(left, right);
        assert_eq!(left, Minor);
    }

    #[test]
    fn test_aggregate_only_none() {
        assert_eq!(aggregate([None, None]), None);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Minor.to_string(), "minor");
        assert_eq!(serde_json::to_string(&Patch).unwrap(), "\"patch\"");
        assert!(!None.is_release());
        assert!(Major.is_release());
    }
}
