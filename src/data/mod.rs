// mod.rs - Data structures module

pub mod loaders;
pub mod sequence;

// Re-export main types for convenience
pub use loaders::{load_from_reader, load_sequences, FastaFilter};
pub use sequence::Sequence;
