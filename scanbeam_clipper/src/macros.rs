/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for extracting macro repetition count for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a [Path](crate::core::math::Path) from a list of (x, y) integer tuples.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::core::math::*;
/// let p = path![(0, 0), (10, 0), (10, 10)];
/// assert_eq!(p.len(), 3);
/// assert_eq!(p[1], IntPoint::new(10, 0));
/// ```
#[macro_export]
macro_rules! path {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut p: $crate::core::math::Path = ::std::vec::Vec::with_capacity(size);
            $(
                p.push($crate::core::math::IntPoint::new($x.0, $x.1));
            )*
            p
        }
    };
}
