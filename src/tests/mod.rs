//! integrated tests

mod export;
mod parsing;
