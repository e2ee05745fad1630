use std::{fmt, str::FromStr};

/// The image datasets a predictor can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// 28x28 grayscale digits.
    Mnist,
    /// 32x32 color images.
    Cifar10,
}

impl Dataset {
    /// The side length of the dataset's square images.
    pub fn image_side(self) -> usize {
        match self {
            Dataset::Mnist => 28,
            Dataset::Cifar10 => 32,
        }
    }

    /// The amount of features of a flattened, channel-reduced image.
    pub fn input_dim(self) -> usize {
        self.image_side().pow(2)
    }

    /// The amount of channels of the dataset's raw images.
    pub fn channels(self) -> usize {
        match self {
            Dataset::Mnist => 1,
            Dataset::Cifar10 => 3,
        }
    }

    /// The lowercase tag used in log file names.
    pub fn tag(self) -> &'static str {
        match self {
            Dataset::Mnist => "mnist",
            Dataset::Cifar10 => "cifar10",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mnist" => Ok(Dataset::Mnist),
            "cifar10" | "cifar-10" => Ok(Dataset::Cifar10),
            other => Err(format!("unknown dataset {other}, expected mnist or cifar10")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions() {
        assert_eq!(Dataset::Mnist.input_dim(), 784);
        assert_eq!(Dataset::Cifar10.input_dim(), 1024);
        assert_eq!(Dataset::Cifar10.channels(), 3);
    }

    #[test]
    fn parses_its_own_tag() {
        for dataset in [Dataset::Mnist, Dataset::Cifar10] {
            assert_eq!(dataset.tag().parse::<Dataset>(), Ok(dataset));
        }
        assert_eq!("CIFAR10".parse::<Dataset>(), Ok(Dataset::Cifar10));
        assert!("svhn".parse::<Dataset>().is_err());
    }
}
