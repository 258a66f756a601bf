/// Produces branch labels that are unique for the lifetime of one
/// translation run.
///
/// Relational ops need two jump targets each: a "true" label for the
/// taken comparison and a "done" label where both paths converge. Two
/// independent counters, both bumped on every request and never reset,
/// keep every label distinct across the whole run — including across
/// input files sharing one output stream. The op name prefixes the label
/// so repeats of different kinds cannot collide either.
#[derive(Debug, Default)]
pub struct LabelGenerator {
    true_count: u32,
    done_count: u32,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh `(true, done)` label pair for one comparison site.
    pub fn branch_pair(&mut self, prefix: &str) -> (String, String) {
        let true_label = format!("{}_TRUE_{}", prefix, self.true_count);
        let done_label = format!("{}_DONE_{}", prefix, self.done_count);
        self.true_count += 1;
        self.done_count += 1;
        (true_label, done_label)
    }
}
