pub mod program_counter;
