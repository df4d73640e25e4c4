pub mod random_samples;
pub mod sample;
