mod config;
mod helpers;
mod simulate;
