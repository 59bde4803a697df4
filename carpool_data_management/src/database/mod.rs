pub mod constants;
pub mod db;
mod seed;
