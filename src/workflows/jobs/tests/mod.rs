mod common;

mod estimate;
mod release;
mod storage;
