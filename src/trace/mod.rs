pub mod comparator;

pub mod divergence;

pub mod program_counter;

pub mod trace_line;

pub mod trace_log;
