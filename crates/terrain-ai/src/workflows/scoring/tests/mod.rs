mod common;
mod evaluation;
mod sizing;
