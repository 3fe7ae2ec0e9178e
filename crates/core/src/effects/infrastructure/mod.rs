pub mod sox_engine;
