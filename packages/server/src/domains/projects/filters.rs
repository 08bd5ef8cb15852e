//! Listing operations over a merged project list. Pure; inputs are never modified.

use super::models::{CategoryFilter, ProjectRecord, ScoreKey};

/// Projects in `filter`'s category, in input order. `All` returns every project.
pub fn filter_by_category(projects: &[ProjectRecord], filter: CategoryFilter) -> Vec<ProjectRecord> {
    match filter {
        CategoryFilter::All => projects.to_vec(),
        CategoryFilter::Only(_) => projects
            .iter()
            .filter(|p| filter.matches(p.category))
            .cloned()
            .collect(),
    }
}

/// A copy of `projects` ordered by descending `key` score. Stable: equal
/// scores keep their input order.
pub fn sort_by_score(projects: &[ProjectRecord], key: ScoreKey) -> Vec<ProjectRecord> {
    let mut sorted = projects.to_vec();
    sorted.sort_by(|a, b| b.scores.get(key).cmp(&a.scores.get(key)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::projects::models::Category;
    use crate::kernel::test_dependencies::sample_project;

    fn mixed() -> Vec<ProjectRecord> {
        vec![
            sample_project(1, Category::Biology, [80, 70, 60, 50]),
            sample_project(2, Category::Ai, [90, 60, 70, 95]),
            sample_project(3, Category::Biology, [70, 90, 85, 88]),
            sample_project(4, Category::ClimateScience, [60, 80, 90, 40]),
            sample_project(5, Category::Biology, [95, 85, 60, 88]),
        ]
    }

    fn ids(projects: &[ProjectRecord]) -> Vec<i64> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let projects = mixed();
        assert_eq!(filter_by_category(&projects, CategoryFilter::All), projects);
        assert!(filter_by_category(&[], CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_filter_is_exact_and_complete() {
        let projects = mixed();
        let biology = filter_by_category(&projects, CategoryFilter::Only(Category::Biology));

        assert!(biology.iter().all(|p| p.category == Category::Biology));
        assert_eq!(ids(&biology), vec![1, 3, 5]);
    }

    #[test]
    fn test_filter_with_no_matches() {
        let projects = mixed();
        assert!(filter_by_category(&projects, CategoryFilter::Only(Category::MaterialsScience)).is_empty());
    }

    #[test]
    fn test_sort_is_descending() {
        let projects = mixed();
        for key in ScoreKey::ALL {
            let sorted = sort_by_score(&projects, key);
            assert_eq!(sorted.len(), projects.len());
            assert!(sorted
                .windows(2)
                .all(|pair| pair[0].scores.get(key) >= pair[1].scores.get(key)));
        }
        assert_eq!(ids(&sort_by_score(&projects, ScoreKey::Funding)), vec![4, 3, 2, 1, 5]);
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        let projects = mixed();
        // 3 and 5 both have engagement 88
        assert_eq!(ids(&sort_by_score(&projects, ScoreKey::Engagement)), vec![2, 3, 5, 1, 4]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let projects = mixed();
        let snapshot = projects.clone();
        let _ = sort_by_score(&projects, ScoreKey::Transparency);
        assert_eq!(projects, snapshot);
    }

    #[test]
    fn test_filter_then_sort() {
        let projects = mixed();
        let biology = filter_by_category(&projects, CategoryFilter::Only(Category::Biology));
        let ranked = sort_by_score(&biology, ScoreKey::Engagement);
        assert_eq!(ids(&ranked), vec![3, 5, 1]);
    }
}
