//! The fixed set of API classes whose documentation is cached and checked.

/// An API class tracked by the checker, paired with its documentation page.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TrackedClass {
    /// The class name as it appears in scripts (e.g., `GSGoal`).
    pub name: &'static str,
    /// The documentation page identifier relative to the docs base URL.
    pub doc_page: &'static str,
}

/// All tracked classes, in maintenance iteration order.
const TRACKED_CLASSES: &[TrackedClass] = &[
    TrackedClass { name: "GSNews", doc_page: "classGSNews.html" },
    TrackedClass { name: "GSCompany", doc_page: "classGSCompany.html" },
    TrackedClass { name: "GSController", doc_page: "classGSController.html" },
    TrackedClass { name: "GSDate", doc_page: "classGSDate.html" },
    TrackedClass { name: "GSEventController", doc_page: "classGSEventController.html" },
    TrackedClass { name: "GSStoryPage", doc_page: "classGSStoryPage.html" },
    TrackedClass { name: "GSGoal", doc_page: "classGSGoal.html" },
    TrackedClass { name: "GSSign", doc_page: "classGSSign.html" },
    TrackedClass { name: "GSTown", doc_page: "classGSTown.html" },
    TrackedClass { name: "GSCargo", doc_page: "classGSCargo.html" },
    TrackedClass { name: "GSStation", doc_page: "classGSStation.html" },
];

/// Returns every tracked class in registry order.
pub fn tracked_classes() -> &'static [TrackedClass] {
    TRACKED_CLASSES
}

/// Looks up a tracked class by its exact name.
pub fn find_class(name: &str) -> Option<&'static TrackedClass> {
    TRACKED_CLASSES.iter().find(|c| c.name == name)
}

/// Returns `true` if `name` is one of the tracked classes.
pub fn is_tracked(name: &str) -> bool {
    find_class(name).is_some()
}
