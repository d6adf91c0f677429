pub mod clock;
pub mod mode;
pub mod synchronizer;
