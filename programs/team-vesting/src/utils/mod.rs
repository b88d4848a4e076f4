pub mod pda;
pub mod schedule;
pub mod unlock;
