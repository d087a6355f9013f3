pub mod metadata;
pub mod storage;
pub mod worker;
