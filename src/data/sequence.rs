// sequence.rs - Immutable named residue strings

use std::fmt;
use std::hash::{Hash, Hasher};

/// A named residue string with a run-assigned numeric id.
///
/// Equality and hashing look at the header text only: two records with the
/// same header are the same entity even when their residues differ.
#[derive(Debug, Clone)]
pub struct Sequence {
    id: usize,
    header: String,
    residues: String,
    symbols: Vec<char>,
}

impl Sequence {
    pub fn new(id: usize, header: impl Into<String>, residues: impl Into<String>) -> Self {
        let residues = residues.into();
        let symbols = residues.chars().collect();
        Self {
            id,
            header: header.into(),
            residues,
            symbols,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn residues(&self) -> &str {
        &self.residues
    }

    /// Residues as individual symbols, the unit the alignment works on
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of residues
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.header.hash(state);
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_uses_header_value() {
        // Built from separate allocations so pointer identity cannot match
        let header_a = String::from("seq") + "1";
        let header_b = format!("seq{}", 1);
        let a = Sequence::new(0, header_a, "ACGT");
        let b = Sequence::new(7, header_b, "TTTT");
        let c = Sequence::new(0, "seq2", "ACGT");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Sequence> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_accessors() {
        let seq = Sequence::new(3, "neurite 3", "AAT");
        assert_eq!(seq.id(), 3);
        assert_eq!(seq.header(), "neurite 3");
        assert_eq!(seq.residues(), "AAT");
        assert_eq!(seq.symbols(), &['A', 'A', 'T']);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
        assert_eq!(seq.to_string(), "\"neurite 3\"");
    }

    #[test]
    fn test_length_counts_residues_not_bytes() {
        let seq = Sequence::new(0, "greek", "αβγ");
        assert_eq!(seq.len(), 3);
        assert!(Sequence::new(1, "empty", "").is_empty());
    }
}
