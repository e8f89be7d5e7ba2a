mod preprocess;

pub use preprocess::Binarizer;
