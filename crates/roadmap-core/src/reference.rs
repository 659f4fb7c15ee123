//! The built-in reference assessment.
//!
//! Eight domains, two questions each, mapped onto curriculum stages 1..=8.
//! Used whenever no assessment file is configured, and written out by
//! `roadmap init` as a starting point for custom assessments.

use std::path::Path;

use anyhow::Result;

use crate::model::Assessment;
use crate::parser::parse_assessment_str;

/// TOML source of the reference assessment.
pub const REFERENCE_ASSESSMENT_TOML: &str = r#"[assessment]
id = "cs-roadmap"
name = "CS Expert Roadmap placement"
description = "Sixteen-question self-assessment that picks a starting stage in the roadmap"

[stages]
min = 1
max = 8
default = [1, 2, 3]

[stages.domains]
programming = [1, 2, 4]
algorithms = [2, 3, 5]
data_structures = [2, 3, 5]
databases = [3, 5, 6]
web = [3, 4, 6]
math = [1, 3, 6]
systems = [3, 5, 7]
machine_learning = [4, 6, 8]

[[questions]]
domain = "programming"
weight = 1.5
prompt = "How comfortable are you writing programs from scratch?"
options = [
    "I have not written a program yet",
    "I can write small scripts with loops and functions",
    "I build multi-module projects and refactor confidently",
]

[[questions]]
domain = "programming"
weight = 1.0
prompt = "How do you track down a bug?"
options = [
    "I mostly guess and re-run",
    "I add print statements and read error messages",
    "I use a debugger, write a failing test, and bisect",
]

[[questions]]
domain = "algorithms"
weight = 1.5
prompt = "Can you reason about the time complexity of your code?"
options = [
    "I do not know what Big-O means",
    "I can tell O(n) from O(n^2) for simple loops",
    "I analyse recursive and amortized costs",
]

[[questions]]
domain = "algorithms"
weight = 1.0
prompt = "Which algorithm design techniques can you apply?"
options = [
    "None yet",
    "Sorting, binary search, basic recursion",
    "Dynamic programming, greedy proofs, graph algorithms",
]

[[questions]]
domain = "data_structures"
weight = 1.5
prompt = "Which data structures can you implement yourself?"
options = [
    "Arrays are the only one I know",
    "Linked lists, stacks, queues, hash maps",
    "Balanced trees, heaps, tries, union-find",
]

[[questions]]
domain = "data_structures"
weight = 1.0
prompt = "How do you choose a data structure for a problem?"
options = [
    "I use whatever the tutorial used",
    "I compare lookup and insertion costs",
    "I weigh memory layout, access patterns, and invariants",
]

[[questions]]
domain = "databases"
weight = 1.0
prompt = "How much SQL do you know?"
options = [
    "None",
    "SELECT with WHERE, JOIN, and GROUP BY",
    "Window functions, query plans, and index tuning",
]

[[questions]]
domain = "databases"
weight = 1.0
prompt = "Can you design a database schema?"
options = [
    "I have never designed one",
    "I can model tables with primary and foreign keys",
    "I normalize, denormalize deliberately, and reason about transactions",
]

[[questions]]
domain = "web"
weight = 1.0
prompt = "How well do you know how the web works?"
options = [
    "I browse, but do not know what happens underneath",
    "I understand HTTP requests, HTML, CSS, and basic JavaScript",
    "I have built and deployed full-stack applications",
]

[[questions]]
domain = "web"
weight = 0.5
prompt = "Have you built an HTTP API?"
options = [
    "No",
    "A simple CRUD API following a tutorial",
    "Authenticated, versioned APIs with tests and monitoring",
]

[[questions]]
domain = "math"
weight = 1.0
prompt = "How comfortable are you with discrete mathematics?"
options = [
    "Proofs and sets are new to me",
    "I can follow induction proofs and basic combinatorics",
    "I write proofs and use graph theory and probability fluently",
]

[[questions]]
domain = "math"
weight = 1.0
prompt = "How comfortable are you with linear algebra and calculus?"
options = [
    "I have not studied them",
    "I know matrix operations and derivatives",
    "I use eigen-decompositions and multivariate calculus",
]

[[questions]]
domain = "systems"
weight = 1.0
prompt = "How well do you understand operating systems?"
options = [
    "I only use the graphical interface",
    "I know processes, threads, files, and the shell",
    "I understand scheduling, virtual memory, and concurrency primitives",
]

[[questions]]
domain = "systems"
weight = 1.0
prompt = "How well do you understand computer architecture and networking?"
options = [
    "Not at all",
    "I know what the CPU, caches, and TCP/IP do",
    "I reason about pipelines, cache behaviour, and protocol design",
]

[[questions]]
domain = "machine_learning"
weight = 1.0
prompt = "What machine learning have you done?"
options = [
    "None",
    "I have trained models with a library such as scikit-learn",
    "I implement, tune, and evaluate models from first principles",
]

[[questions]]
domain = "machine_learning"
weight = 0.5
prompt = "How familiar are you with deep learning?"
options = [
    "I have only heard of it",
    "I have trained a neural network from a tutorial",
    "I design architectures and read current papers",
]
"#;

/// Parse the built-in reference assessment.
pub fn reference_assessment() -> Result<Assessment> {
    parse_assessment_str(
        REFERENCE_ASSESSMENT_TOML,
        Path::new("<builtin:cs-roadmap.toml>"),
    )
}
