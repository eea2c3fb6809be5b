//! Common test cases for the graph matching workspace.
//!
//! Each case is a complete exam-style task (edge list, table, queried labels)
//! with the outcome the engine is expected to produce. Both the engine's
//! integration tests and the command line front end's smoke checks draw
//! from this table.

use crate::config::Config;
use crate::parse::ProblemText;

/// What solving a [`TestCase`] must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A successful answer, rendered in exam convention (sorted, concatenated row numbers).
    Answer(&'static str),
    /// Vertex counts of the two graphs differ.
    VertexCountMismatch,
    /// A queried label is not a vertex of the lettered graph.
    UnknownQueriedVertex,
    /// Degree multisets differ.
    DegreeMismatch,
    /// Weight multisets differ.
    WeightMismatch,
    /// Signature class sizes differ.
    SignatureGroupMismatch,
    /// The search ran to completion without a full mapping.
    NoIsomorphism,
}

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The configuration for the search.
    pub config: Config,
    /// The task text.
    pub text: ProblemText,
    /// The expected outcome.
    pub expected: Expected,
}

impl TestCase {
    fn new(
        name: &'static str,
        config: Config,
        edges: &str,
        matrix: &str,
        queries: &str,
        expected: Expected,
    ) -> Self {
        Self {
            name,
            config,
            text: ProblemText::new(edges, matrix, queries),
            expected,
        }
    }
}

// #####################
// TABLES
// #####################
const PATH_4: &str = "\
0 1 0 0
1 0 1 0
0 1 0 1
0 0 1 0";

const BOWTIE_5: &str = "\
0 1 0 0 0
1 0 1 1 0
0 1 0 1 0
0 1 1 0 1
0 0 0 1 0";

const SHUFFLED_6: &str = "\
0 0 0 0 1 1
0 0 0 1 0 1
0 0 0 0 1 0
0 1 0 0 0 0
1 0 1 0 0 1
1 1 0 0 1 0";

const HEXAGON: &str = "\
0 1 0 0 0 1
1 0 1 0 0 0
0 1 0 1 0 0
0 0 1 0 1 0
0 0 0 1 0 1
1 0 0 0 1 0";

const TRIANGLE_AND_PATH: &str = "\
0 1 1 0 0 0
1 0 1 0 0 0
1 1 0 0 0 0
0 0 0 0 1 0
0 0 0 1 0 1
0 0 0 0 1 0";

const WEIGHTED_TRIANGLE: &str = "\
0 6 10
6 0 4
10 4 0";

const WEIGHTED_PATH: &str = "\
0 10 0
10 0 7
0 7 0";

const ISOLATED_3: &str = "\
. . .
. . *
. * .";

lazy_static::lazy_static! {
    /// Every shared case.
    pub static ref ALL_TEST_CASES: Vec<TestCase> = vec![
        TestCase::new(
            "bowtie_symmetric_ends",
            Config::unweighted(),
            "A-B\nB-C\nB-D\nC-D\nD-E",
            BOWTIE_5,
            "A, E",
            Expected::Answer("15"),
        ),
        TestCase::new(
            "path_endpoint_ambiguous",
            Config::unweighted(),
            "A-B\nB-C\nC-D",
            PATH_4,
            "A",
            Expected::Answer("14"),
        ),
        TestCase::new(
            "path_interior_ambiguous",
            Config::unweighted(),
            "A-B\nB-C\nC-D",
            PATH_4,
            "B",
            Expected::Answer("23"),
        ),
        TestCase::new(
            "shuffled_unique",
            Config::unweighted(),
            "A-B\nB-C\nB-D\nC-D\nD-E\nE-F",
            SHUFFLED_6,
            "A F",
            Expected::Answer("34"),
        ),
        TestCase::new(
            "weighted_triangle_unique",
            Config::weighted(),
            "A-B 10\nB-C 6\nC-A 4",
            WEIGHTED_TRIANGLE,
            "A",
            Expected::Answer("3"),
        ),
        TestCase::new(
            "unweighted_triangle_symmetric",
            Config::unweighted(),
            "A-B 10\nB-C 6\nC-A 4",
            WEIGHTED_TRIANGLE,
            "A",
            Expected::Answer("123"),
        ),
        TestCase::new(
            "isolated_vertex",
            Config::unweighted(),
            "A-B\nC",
            ISOLATED_3,
            "C",
            Expected::Answer("1"),
        ),
        TestCase::new(
            "weight_multiset_differs",
            Config::weighted(),
            "A-B 10\nB-C 6",
            WEIGHTED_PATH,
            "A",
            Expected::WeightMismatch,
        ),
        TestCase::new(
            "cycle_against_path",
            Config::unweighted(),
            "A-B\nB-C\nC-D\nD-A",
            PATH_4,
            "A",
            Expected::DegreeMismatch,
        ),
        TestCase::new(
            "path_against_triangle_and_path",
            Config::unweighted(),
            "A-B\nB-C\nC-D\nD-E\nE-F",
            TRIANGLE_AND_PATH,
            "A",
            Expected::SignatureGroupMismatch,
        ),
        TestCase::new(
            "two_triangles_against_hexagon",
            Config::unweighted(),
            "A-B\nB-C\nC-A\nD-E\nE-F\nF-D",
            HEXAGON,
            "A",
            Expected::NoIsomorphism,
        ),
        TestCase::new(
            "vertex_count_differs",
            Config::unweighted(),
            "A-B\nB-C",
            "0 1\n1 0",
            "A",
            Expected::VertexCountMismatch,
        ),
        TestCase::new(
            "unknown_queried_label",
            Config::unweighted(),
            "A-B\nB-C\nC-D",
            PATH_4,
            "Z",
            Expected::UnknownQueriedVertex,
        ),
    ];
}

/// Look up a shared case by name.
pub fn test_case(name: &str) -> Option<&'static TestCase> {
    ALL_TEST_CASES.iter().find(|tc| tc.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_case_parses() {
        for tc in ALL_TEST_CASES.iter() {
            tc.text
                .parse()
                .unwrap_or_else(|e| panic!("case '{}' does not parse: {e}", tc.name));
        }
    }

    #[test]
    fn case_names_are_unique() {
        let mut names: Vec<&str> = ALL_TEST_CASES.iter().map(|tc| tc.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_TEST_CASES.len());
        assert!(test_case("cycle_against_path").is_some());
    }
}
