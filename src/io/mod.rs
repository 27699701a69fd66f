//! Diagnostic output.
//!
//! - **Profiles**: potential and density sampled along x, written as
//!   whitespace-separated columns

mod profile;

pub use profile::{ProfileError, ProfileSample, sample_profile, write_profile, write_profile_file};
