pub mod account;
pub mod candidate;
pub mod company;
pub mod job;
pub mod vocabulary;
