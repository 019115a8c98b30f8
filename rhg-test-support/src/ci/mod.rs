//! Run-profile settings read from the environment by CI and local runs.

pub mod property_test_profile;
