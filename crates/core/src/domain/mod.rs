pub mod bid;
pub mod product;
pub mod rfp;
