mod helpers;
mod schedule;
mod single_elimination;
mod swiss;
