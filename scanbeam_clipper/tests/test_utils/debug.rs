use scanbeam_clipper::{clipper::Solution, core::math::IntPoint};

/// Helper function to create json string from a path to be used for debugging.
pub fn to_debug_json_str(path: &[IntPoint]) -> String {
    format!(
        r#"
{{
    "points": [
        {}
    ]
}}
"#,
        path.iter()
            .map(|p| format!("[{}, {}]", p.x, p.y))
            .collect::<Vec<_>>()
            .join(",\n        ")
    )
}

/// Debug json for every path of a solution, with hole and parent information.
pub fn solution_debug_str(solution: &Solution) -> String {
    solution
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "// {}: is_hole: {}, is_open: {}, parent: {:?}{}",
                i,
                p.is_hole,
                p.is_open,
                p.parent,
                to_debug_json_str(&p.points)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
