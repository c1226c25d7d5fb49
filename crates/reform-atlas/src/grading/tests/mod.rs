mod common;

mod category;
mod percentile;
