#![allow(dead_code)]

mod test_db;

pub use test_db::{create_file_database, create_test_database, insert_raw_user};
