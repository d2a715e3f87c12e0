pub mod augment;
pub mod circuit;
pub mod connectivity;
pub mod shortest_path;
