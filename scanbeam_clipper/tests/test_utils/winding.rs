use scanbeam_clipper::{
    clipper::{ClipType, FillRule, Solution},
    core::math::IntPoint,
};

/// Winding number of `path` around `(x, y)`, positive inside loops with positive area.
pub fn winding_number(x: f64, y: f64, path: &[IntPoint]) -> i32 {
    let Some(&last) = path.last() else {
        return 0;
    };
    let mut wn = 0;
    let mut prev = last;
    for &curr in path {
        let (x0, y0) = (prev.x as f64, prev.y as f64);
        let (x1, y1) = (curr.x as f64, curr.y as f64);
        let side = (x1 - x0) * (y - y0) - (x - x0) * (y1 - y0);
        if y0 <= y && y1 > y && side > 0.0 {
            wn += 1;
        } else if y1 <= y && y0 > y && side < 0.0 {
            wn -= 1;
        }
        prev = curr;
    }
    wn
}

pub fn set_winding_number<P: AsRef<[IntPoint]>>(x: f64, y: f64, paths: &[P]) -> i32 {
    paths.iter().map(|p| winding_number(x, y, p.as_ref())).sum()
}

/// Sum of the winding numbers of every closed output path.
pub fn solution_winding_number(x: f64, y: f64, solution: &Solution) -> i32 {
    solution
        .iter()
        .filter(|p| !p.is_open)
        .map(|p| winding_number(x, y, &p.points))
        .sum()
}

pub fn is_filled(fill_rule: FillRule, winding: i32) -> bool {
    match fill_rule {
        FillRule::EvenOdd => winding % 2 != 0,
        FillRule::NonZero => winding != 0,
        FillRule::Positive => winding > 0,
        FillRule::Negative => winding < 0,
    }
}

/// Whether the boolean result should cover `(x, y)`, from the winding of each input set.
pub fn expected_filled<P: AsRef<[IntPoint]>>(
    x: f64,
    y: f64,
    op: ClipType,
    subject: &[P],
    clip: &[P],
    subject_fill: FillRule,
    clip_fill: FillRule,
) -> bool {
    let s = is_filled(subject_fill, set_winding_number(x, y, subject));
    let c = is_filled(clip_fill, set_winding_number(x, y, clip));
    match op {
        ClipType::Intersection => s && c,
        ClipType::Union => s || c,
        ClipType::Difference => s && !c,
        ClipType::Xor => s != c,
    }
}

/// Distance from `(x, y)` to the nearest edge of any path.
pub fn distance_to_edges<P: AsRef<[IntPoint]>>(x: f64, y: f64, paths: &[P]) -> f64 {
    let mut min = f64::INFINITY;
    for path in paths {
        let path = path.as_ref();
        let Some(&last) = path.last() else {
            continue;
        };
        let mut prev = last;
        for &curr in path {
            let (x0, y0) = (prev.x as f64, prev.y as f64);
            let (dx, dy) = (curr.x as f64 - x0, curr.y as f64 - y0);
            let len2 = dx * dx + dy * dy;
            let t = if len2 == 0.0 {
                0.0
            } else {
                (((x - x0) * dx + (y - y0) * dy) / len2).clamp(0.0, 1.0)
            };
            let (px, py) = (x0 + t * dx, y0 + t * dy);
            min = min.min(((x - px).powi(2) + (y - py).powi(2)).sqrt());
            prev = curr;
        }
    }
    min
}
