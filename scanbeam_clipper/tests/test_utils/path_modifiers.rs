use scanbeam_clipper::core::math::{IntPoint, Path};

/// Cycles all the point index positions forward by `n`. E.g. index 0 becomes 1, last index becomes
/// 0, etc.
pub fn cycle_start_index_forward(input: &[IntPoint], n: usize) -> Path {
    assert!(n > 0, "cycling forward by 0 just returns the same path");
    assert!(
        n < input.len(),
        "cycling forward by more than the path length is unnecessary"
    );
    input.iter().cycle().skip(n).take(input.len()).copied().collect()
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPathState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

impl ModifiedPathState {
    pub fn new(inverted_direction: bool, cycle_position: usize) -> Self {
        Self {
            inverted_direction,
            cycle_position,
        }
    }
}

/// Set of variants of a closed path describing the same loop: every start index, optionally in
/// both directions.
#[derive(Debug, Clone)]
pub struct ModifiedPathSet<'a> {
    pub input: &'a [IntPoint],
    pub invert_direction: bool,
    pub cycle_index_positions: bool,
}

impl<'a> ModifiedPathSet<'a> {
    pub fn new(input: &'a [IntPoint], invert_direction: bool, cycle_index_positions: bool) -> Self {
        Self {
            input,
            invert_direction,
            cycle_index_positions,
        }
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(Path, ModifiedPathState),
    {
        let directions: &[bool] = if self.invert_direction {
            &[false, true]
        } else {
            &[false]
        };

        for &inverted in directions {
            let base: Path = if inverted {
                self.input.iter().rev().copied().collect()
            } else {
                self.input.to_vec()
            };

            visitor(base.clone(), ModifiedPathState::new(inverted, 0));

            if self.cycle_index_positions {
                for n in 1..base.len() {
                    visitor(
                        cycle_start_index_forward(&base, n),
                        ModifiedPathState::new(inverted, n),
                    );
                }
            }
        }
    }
}
