pub mod driver;
pub mod options;
pub mod scripts;
