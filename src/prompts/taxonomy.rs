use crate::domains::feature::OptionGroups;

/// Lesson categories and their subtopics, in sidebar order.
pub const TOPICS: OptionGroups = &[
    (
        "Python Basics",
        &[
            "Variables and data types",
            "Loops",
            "Functions",
            "Lists and dictionaries",
            "File handling",
        ],
    ),
    (
        "Web Development",
        &[
            "HTML structure",
            "CSS Flexbox",
            "JavaScript DOM manipulation",
            "REST APIs",
            "HTTP basics",
        ],
    ),
    (
        "Git & Version Control",
        &[
            "Git basics",
            "Branching and merging",
            "Pull requests",
            "Resolving merge conflicts",
        ],
    ),
    (
        "Data Structures",
        &[
            "Arrays",
            "Linked lists",
            "Stacks and queues",
            "Hash tables",
            "Trees",
        ],
    ),
    (
        "Algorithms",
        &[
            "Big O notation",
            "Binary search",
            "Sorting algorithms",
            "Recursion",
        ],
    ),
    (
        "Databases",
        &["SQL SELECT queries", "Joins", "Indexes", "Normalization"],
    ),
];

/// Finds a subtopic (case-insensitively) and returns `(category, subtopic)`.
pub fn lookup(subtopic: &str) -> Option<(&'static str, &'static str)> {
    let wanted = subtopic.trim();
    if wanted.is_empty() {
        return None;
    }
    TOPICS.iter().find_map(|(category, subtopics)| {
        subtopics
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
            .map(|found| (*category, *found))
    })
}
