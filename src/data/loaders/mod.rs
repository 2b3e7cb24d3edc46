// mod.rs - Input loaders

pub mod fasta;

pub use fasta::{load_from_reader, load_sequences, FastaFilter};
