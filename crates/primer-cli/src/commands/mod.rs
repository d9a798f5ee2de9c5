pub mod descend;
pub mod describe;
pub mod hypothesis;
pub mod kids;
pub mod regression;
