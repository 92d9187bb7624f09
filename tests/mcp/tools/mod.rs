mod config;
mod sync;
