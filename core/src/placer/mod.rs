pub use random::*;

mod random;

/// Random-selection primitive used to place mines.
///
/// `pick(candidates, count)` must return `count` distinct indices in `0..candidates`. The
/// board only calls it with `count < candidates`.
pub trait MinePlacer {
    fn pick(&mut self, candidates: usize, count: usize) -> Vec<usize>;
}

/// Scripted placement for tests and replays.
impl<F> MinePlacer for F
where
    F: FnMut(usize, usize) -> Vec<usize>,
{
    fn pick(&mut self, candidates: usize, count: usize) -> Vec<usize> {
        self(candidates, count)
    }
}
