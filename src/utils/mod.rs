pub mod text;
mod timeit;
