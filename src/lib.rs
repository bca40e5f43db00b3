pub mod campus_locations;
pub mod constants;
pub mod course_import;
pub mod data_backend;
pub mod data_types;
pub mod db_operations;
pub mod errors;
pub mod recommendation;
pub mod shared_main;
