pub mod bivariate;
pub mod dots;
