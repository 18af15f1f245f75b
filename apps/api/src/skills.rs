//! Skill planning — set-based comparison of candidate skills against job skills.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Result of comparing a candidate's skill set against a job's.
///
/// All four lists are normalized (trimmed, lowercased, deduplicated) and
/// sorted. `gaps` = job − candidate, `overlap` = job ∩ candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPlan {
    pub gaps: Vec<String>,
    pub overlap: Vec<String>,
    pub job: Vec<String>,
    pub candidate: Vec<String>,
}

/// Trims, lowercases, drops empties, and deduplicates a skill list.
/// Output is sorted lexicographically.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    let set: BTreeSet<String> = skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    set.into_iter().collect()
}

/// Computes gaps and overlap between candidate and job skills.
/// Pure function; empty inputs produce empty outputs.
pub fn compute_skill_plan(candidate_skills: &[String], job_skills: &[String]) -> SkillPlan {
    let cand: BTreeSet<String> = normalize_skills(candidate_skills).into_iter().collect();
    let job: BTreeSet<String> = normalize_skills(job_skills).into_iter().collect();

    SkillPlan {
        gaps: job.difference(&cand).cloned().collect(),
        overlap: job.intersection(&cand).cloned().collect(),
        job: job.iter().cloned().collect(),
        candidate: cand.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_trims_lowercases_dedupes() {
        let skills = strs(&["  Python ", "python", "SQL", "", "   "]);
        assert_eq!(normalize_skills(&skills), strs(&["python", "sql"]));
    }

    #[test]
    fn test_basic_plan() {
        let plan = compute_skill_plan(&strs(&["Python"]), &strs(&["python", "SQL"]));
        assert_eq!(plan.gaps, strs(&["sql"]));
        assert_eq!(plan.overlap, strs(&["python"]));
        assert_eq!(plan.job, strs(&["python", "sql"]));
        assert_eq!(plan.candidate, strs(&["python"]));
    }

    #[test]
    fn test_empty_inputs() {
        let plan = compute_skill_plan(&[], &[]);
        assert!(plan.gaps.is_empty());
        assert!(plan.overlap.is_empty());
        assert!(plan.job.is_empty());
        assert!(plan.candidate.is_empty());
    }

    #[test]
    fn test_gaps_and_overlap_partition_job() {
        let cand = strs(&["rust", "tokio", "SQL"]);
        let job = strs(&["Rust", "axum", "sql", "kubernetes"]);
        let plan = compute_skill_plan(&cand, &job);

        // gaps and overlap are disjoint
        for g in &plan.gaps {
            assert!(!plan.overlap.contains(g), "{g} in both gaps and overlap");
        }

        // gaps ∪ overlap = normalized(job)
        let mut union: Vec<String> = plan
            .gaps
            .iter()
            .chain(plan.overlap.iter())
            .cloned()
            .collect();
        union.sort();
        assert_eq!(union, plan.job);
    }

    #[test]
    fn test_outputs_sorted() {
        let plan = compute_skill_plan(&strs(&["z", "a"]), &strs(&["m", "z", "b"]));
        let mut sorted = plan.gaps.clone();
        sorted.sort();
        assert_eq!(plan.gaps, sorted);
        assert_eq!(plan.job, strs(&["b", "m", "z"]));
    }
}
