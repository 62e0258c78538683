use crate::Float;

/// Computes the **Manhattan (L1) distance** between two vectors.
///
/// # Definition
///
/// ```text
/// d(a, b) = Σ_i |a_i − b_i|
/// ```
///
/// Both arguments are anything that iterates over `&Float`: slices, `Vec`s,
/// or nalgebra row/column views such as `x.row(i).iter()`.
///
/// # Length policy
///
/// Elements are paired up and iteration stops at the end of the shorter
/// input, so extra trailing coordinates of the longer vector are ignored.
/// Callers that need equal lengths check shapes before calling this.
///
/// # Examples
///
/// ```rust
/// use vinum_core::distance::manhattan;
///
/// let a = [0.0, 1.0, 2.0];
/// let b = [1.0, 1.0, 0.0];
///
/// assert_eq!(manhattan(&a, &b), 3.0);
/// ```
pub fn manhattan<'a, 'b, A, B>(a: A, b: B) -> Float
where
    A: IntoIterator<Item = &'a Float>,
    B: IntoIterator<Item = &'b Float>,
{
    a.into_iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
