use scanbeam_clipper::{
    clipper::Solution,
    core::{
        math::{area, path_bounds, IntPoint},
        traits::FuzzyEq,
    },
};

/// Holds a set of properties of an output path for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct PathProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub is_hole: bool,
    pub extents: (IntPoint, IntPoint),
}

impl PathProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-6;

    pub fn new(
        vertex_count: usize,
        area: f64,
        is_hole: bool,
        min_x: i64,
        min_y: i64,
        max_x: i64,
        max_y: i64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            is_hole,
            extents: (IntPoint::new(min_x, min_y), IntPoint::new(max_x, max_y)),
        }
    }

    pub fn from_path(path: &[IntPoint], is_hole: bool) -> Self {
        Self {
            vertex_count: path.len(),
            area: area(path),
            is_hole,
            extents: path_bounds(path).unwrap(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.vertex_count == other.vertex_count
            && self.is_hole == other.is_hole
            && self.area.fuzzy_eq_eps(other.area, eps)
            && self.extents == other.extents
    }
}

pub fn create_property_set(solution: &Solution) -> Vec<PathProperties> {
    solution
        .iter()
        .map(|p| PathProperties::from_path(&p.points, p.is_hole))
        .collect()
}

pub fn property_sets_match(result_set: &[PathProperties], expected_set: &[PathProperties]) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // using simple N^2 comparisons to compare property sets (sets are always relatively small,
        // e.g. N < 10)
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, PathProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// Every hole has a parent of opposite hole state with opposite area sign, and outer loops with
/// a parent sit inside a hole.
pub fn hole_structure_consistent(solution: &Solution) -> bool {
    solution.iter().filter(|p| !p.is_open).all(|p| {
        let sign_ok = if p.is_hole {
            p.area() < 0.0
        } else {
            p.area() > 0.0
        };
        let parent_ok = match p.parent {
            Some(parent) => {
                let parent = solution.get(parent).unwrap();
                parent.is_hole != p.is_hole && parent.area().signum() != p.area().signum()
            }
            None => !p.is_hole,
        };
        sign_ok && parent_ok
    })
}
