mod config;
mod input;
mod scheduler_props;
