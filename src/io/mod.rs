mod cnf_format;
pub use cnf_format::Reader as CnfReader;
pub use cnf_format::STDIN_PATH;
