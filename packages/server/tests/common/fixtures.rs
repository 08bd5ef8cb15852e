//! Test fixtures for provider data.

use desci_core::domains::projects::{Category, ProjectRecord};
use desci_core::kernel::test_dependencies::sample_project;
use desci_core::kernel::MockProvider;

/// Ids the Hetu registry always contributes.
pub const REGISTRY_IDS: [i64; 3] = [3001, 3002, 3003];

/// Scores are kept below the registry's so ordering assertions stay simple.
pub fn lab_projects() -> Vec<ProjectRecord> {
    vec![
        sample_project(1, Category::Biology, [70, 40, 10, 30]),
        sample_project(2, Category::Ai, [60, 80, 20, 40]),
        sample_project(3, Category::ClimateScience, [50, 60, 30, 85]),
    ]
}

pub fn lab_provider() -> MockProvider {
    MockProvider::returning("lab", lab_projects())
}

/// Same ids as `lab_projects` but different content for id 2.
pub fn overriding_provider() -> MockProvider {
    let mut renamed = sample_project(2, Category::MaterialsScience, [65, 65, 65, 65]);
    renamed.name = "Renamed Project 2".into();
    MockProvider::returning("override", vec![renamed])
}
