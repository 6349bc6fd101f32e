pub mod assignment;
pub mod calculator;
pub mod input;
pub mod report;
pub mod session;
