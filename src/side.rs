//! Source/target halves of a bilingual pair.
use std::fmt;
use std::str::FromStr;

/// Either the source-language (`src`) or target-language (`trg`) half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Src,
    Trg,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Src, Side::Trg];

    /// Tag used in the manifest and as artifact file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Src => "src",
            Side::Trg => "trg",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    /// Only the exact literals are accepted (no case folding, no aliases).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "src" => Ok(Side::Src),
            "trg" => Ok(Side::Trg),
            other => Err(other.to_string()),
        }
    }
}

/// A value held for each side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerSide<T> {
    pub src: T,
    pub trg: T,
}

impl<T> PerSide<T> {
    pub fn new(src: T, trg: T) -> Self {
        Self { src, trg }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Src => &self.src,
            Side::Trg => &self.trg,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Src => &mut self.src,
            Side::Trg => &mut self.trg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PerSide, Side};

    #[test]
    fn parse_exact_literals() {
        assert_eq!("src".parse::<Side>(), Ok(Side::Src));
        assert_eq!("trg".parse::<Side>(), Ok(Side::Trg));
        assert_eq!("source".parse::<Side>(), Err("source".to_string()));
        assert!("SRC".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn per_side_access() {
        let mut ps = PerSide::new(1, 2);
        *ps.get_mut(Side::Trg) += 10;
        assert_eq!(ps.get(Side::Src), &1);
        assert_eq!(ps.get(Side::Trg), &12);
    }
}
