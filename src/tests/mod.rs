pub mod codec_tests;
pub mod snapshot_tests;
pub mod state_tests;
pub mod assignment_tests;
