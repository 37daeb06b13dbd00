// Trading signal derivation
pub mod classifier;

pub use classifier::SignalClassifier;
