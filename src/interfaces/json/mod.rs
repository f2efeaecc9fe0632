pub mod representation_writer;
