use std::fmt;

/// The stage of a run a batch is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Train,
    Val,
    Test,
}

/// The quantities recorded for every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Loss,
    Acc,
}

impl Phase {
    pub fn tag(self) -> &'static str {
        match self {
            Phase::Train => "train",
            Phase::Val => "val",
            Phase::Test => "test",
        }
    }

    /// The metrics sink key for `metric` in this phase, e.g. `val_loss`.
    pub fn key(self, metric: Metric) -> String {
        format!("{self}_{metric}")
    }
}

impl Metric {
    pub fn tag(self) -> &'static str {
        match self {
            Metric::Loss => "loss",
            Metric::Acc => "acc",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_keys() {
        assert_eq!(Phase::Train.key(Metric::Loss), "train_loss");
        assert_eq!(Phase::Val.key(Metric::Acc), "val_acc");
        assert_eq!(Phase::Test.key(Metric::Acc), "test_acc");
    }
}
