pub mod token_generator;
