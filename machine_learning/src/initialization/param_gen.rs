/// Produces the initial values of a run of parameters, usually one layer's slice of the flat
/// buffer.
pub trait ParamGen {
    /// Samples at most `n` parameters out of the generator's remaining budget.
    ///
    /// # Returns
    /// The sampled values, or `None` once the budget is spent.
    fn sample(&mut self, n: usize) -> Option<Vec<f32>>;
}
